//! Runs periodic producers and consumers over a protected buffer as described by a scenario file.
//!
//! ```text
//! cargo run -p protbuf-blocking --example scenario -- scenario.txt
//! RUST_LOG=protbuf=debug cargo run -p protbuf-blocking --example scenario
//! ```
//!
//! A scenario is a list of `#key value` pairs, see [`DEFAULT_SCENARIO`].

use anyhow::{anyhow, bail, Context};
use protbuf_blocking::{traits::*, Config, ProtectedBuffer, Strategy, TracingObserver};
use std::{
    collections::HashMap,
    env, fs,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

const DEFAULT_SCENARIO: &str = "
#sem_impl        1
#sem_consumers   2
#sem_producers   2
#buffer_size     4
#n_values        24
#n_consumers     2
#n_producers     3
#consumer_period 30
#producer_period 20
";

#[derive(Clone, Copy, Debug)]
enum Mode {
    Blocking,
    NonBlocking,
    Timed,
}

impl TryFrom<u64> for Mode {
    type Error = anyhow::Error;
    fn try_from(code: u64) -> anyhow::Result<Self> {
        match code {
            0 => Ok(Self::Blocking),
            1 => Ok(Self::NonBlocking),
            2 => Ok(Self::Timed),
            _ => bail!("unknown access mode {}, expected 0, 1 or 2", code),
        }
    }
}

#[derive(Debug)]
struct Scenario {
    config: Config,
    consumer_mode: Mode,
    producer_mode: Mode,
    n_values: usize,
    n_consumers: usize,
    n_producers: usize,
    consumer_period: Duration,
    producer_period: Duration,
}

impl Scenario {
    fn parse(text: &str) -> anyhow::Result<Self> {
        let mut values = HashMap::new();
        let mut tokens = text.split_whitespace();
        while let Some(token) = tokens.next() {
            let key = token
                .strip_prefix('#')
                .ok_or_else(|| anyhow!("expected `#key`, found `{}`", token))?;
            let value = tokens.next().ok_or_else(|| anyhow!("missing value of `#{}`", key))?;
            values.insert(key, value);
        }
        let get = |key: &str| -> anyhow::Result<u64> {
            let value = values.get(key).ok_or_else(|| anyhow!("missing `#{}`", key))?;
            value.parse().with_context(|| format!("invalid value of `#{}`", key))
        };
        let strategy: Strategy = values
            .get("sem_impl")
            .ok_or_else(|| anyhow!("missing `#sem_impl`"))?
            .parse()?;

        let scenario = Self {
            config: Config::new(strategy, get("buffer_size")? as usize),
            consumer_mode: Mode::try_from(get("sem_consumers")?)?,
            producer_mode: Mode::try_from(get("sem_producers")?)?,
            n_values: get("n_values")? as usize,
            n_consumers: get("n_consumers")? as usize,
            n_producers: get("n_producers")? as usize,
            consumer_period: Duration::from_millis(get("consumer_period")?),
            producer_period: Duration::from_millis(get("producer_period")?),
        };
        scenario.config.validate()?;
        if scenario.n_consumers == 0 || scenario.n_producers == 0 {
            bail!("at least one consumer and one producer are required");
        }
        Ok(scenario)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,protbuf=debug")),
        )
        .with_thread_names(true)
        .init();

    let text = match env::args().nth(1) {
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("cannot read scenario `{}`", path))?
        }
        None => DEFAULT_SCENARIO.to_string(),
    };
    let scenario = Scenario::parse(&text)?;
    tracing::info!(?scenario, "scenario loaded");

    let buf = ProtectedBuffer::<usize, _>::from_config_with_observer(&scenario.config, TracingObserver)?;
    let produced = AtomicUsize::new(0);
    let consumed = AtomicUsize::new(0);
    let start = Instant::now();

    thread::scope(|s| {
        for id in 0..scenario.n_consumers {
            let (buf, scenario, consumed) = (&buf, &scenario, &consumed);
            thread::Builder::new()
                .name(format!("consumer-{}", id))
                .spawn_scoped(s, move || {
                    let mut deadline = start;
                    for _ in 0..scenario.n_values / scenario.n_consumers {
                        deadline += scenario.consumer_period;
                        let item = match scenario.consumer_mode {
                            Mode::Blocking => Some(buf.get()),
                            Mode::NonBlocking => buf.remove(),
                            Mode::Timed => buf.poll(deadline),
                        };
                        if item.is_some() {
                            consumed.fetch_add(1, Ordering::Relaxed);
                        }
                        thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    }
                })
                .expect("failed to spawn consumer");
        }

        for id in scenario.n_consumers..scenario.n_consumers + scenario.n_producers {
            let (buf, scenario, produced) = (&buf, &scenario, &produced);
            thread::Builder::new()
                .name(format!("producer-{}", id))
                .spawn_scoped(s, move || {
                    let mut deadline = start;
                    for i in 0..scenario.n_values / scenario.n_producers {
                        deadline += scenario.producer_period;
                        let item = id * 100 + i;
                        let done = match scenario.producer_mode {
                            Mode::Blocking => {
                                buf.put(item);
                                true
                            }
                            Mode::NonBlocking => buf.add(item).is_ok(),
                            Mode::Timed => buf.offer(item, deadline).is_ok(),
                        };
                        if done {
                            produced.fetch_add(1, Ordering::Relaxed);
                        }
                        thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    }
                })
                .expect("failed to spawn producer");
        }
    });

    let (produced, consumed) = (produced.into_inner(), consumed.into_inner());
    tracing::info!(
        produced,
        consumed,
        left = buf.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "scenario finished"
    );
    assert_eq!(produced, consumed + buf.len());
    Ok(())
}

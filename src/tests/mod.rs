mod activity;
mod ring;
mod utils;

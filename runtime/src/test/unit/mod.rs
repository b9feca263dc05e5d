mod common;

mod config;
mod invoker;
mod kernel_cache;

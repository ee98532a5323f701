#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod config;
mod counters;
mod particles;
mod pointer;
mod scroll;
mod typing;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("Portfolio effects run in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}

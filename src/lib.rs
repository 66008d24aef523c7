// Library surface for headless/integration tests and the binary.
// Everything below app/ui is terminal-agnostic.
pub mod app;
pub mod celebration;
pub mod error;
pub mod game;
pub mod mode;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod settings;
pub mod timer;
pub mod ui;
pub mod util;
pub mod word_pool;

//! Canvas 2D rendering module
//!
//! `shapes` is platform-free; `canvas` executes its commands in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::{AssetPaths, CanvasRenderer};
pub use shapes::{DrawCmd, frame};

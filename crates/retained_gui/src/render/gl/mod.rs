//! OpenGL device over `glow`

#![allow(unsafe_code)]

mod device;
mod shader;

pub use device::GlDevice;

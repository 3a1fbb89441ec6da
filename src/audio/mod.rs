pub mod buffer;
pub mod decode;
pub mod magnitude;
pub mod overview;
pub mod spectral;

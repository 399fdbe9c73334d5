pub mod cancel;
pub mod distro;
pub mod paths;

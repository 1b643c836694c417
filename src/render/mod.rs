pub(crate) mod canvas;
pub(crate) mod context;
pub(crate) mod delta;
pub(crate) mod frame;
pub(crate) mod raster;
pub(crate) mod synth;

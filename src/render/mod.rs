pub(crate) mod accel;
pub(crate) mod border;
pub(crate) mod cpu;
pub(crate) mod frame;
pub(crate) mod layer;
pub(crate) mod surface;
pub(crate) mod widget;

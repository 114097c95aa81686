pub(crate) mod compositor;
pub(crate) mod frame;
pub(crate) mod layout;
pub(crate) mod pixels;
pub(crate) mod shapes;
pub(crate) mod text;

pub(crate) mod cancel;
pub(crate) mod gate;
pub(crate) mod host;
pub(crate) mod run;
pub(crate) mod state;
pub(crate) mod store;

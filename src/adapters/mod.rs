// Adapters layer: concrete implementations of the domain ports (storage, form, navigation, http).

pub mod form;
pub mod http;
pub mod navigator;
pub mod storage;

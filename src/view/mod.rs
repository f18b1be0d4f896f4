pub(crate) mod pan;
pub(crate) mod translator;
pub(crate) mod zoom;

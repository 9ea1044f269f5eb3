mod domain;

pub use domain::Domain;

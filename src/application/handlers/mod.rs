//! Command-style handlers wiring ports to the selection flow.

mod infer_partner_preference;

pub use infer_partner_preference::{
    InferPartnerPreferenceCommand, InferPartnerPreferenceHandler,
};

//! Wire codecs for the two registry endpoints

mod json;
mod xml;

use std::sync::Arc;

use regwapi_core::WireCodec;
use regwapi_domain::WireFormat;

pub use json::JsonCodec;
pub use xml::XmlCodec;

/// Codec matching a configured wire format.
pub fn codec_for(format: WireFormat) -> Arc<dyn WireCodec> {
    match format {
        WireFormat::Xml => Arc::new(XmlCodec),
        WireFormat::Json => Arc::new(JsonCodec),
    }
}

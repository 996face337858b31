mod rcode;
mod record_type;

pub use rcode::rcode_name;
pub use record_type::{record_type_name, RecordType};

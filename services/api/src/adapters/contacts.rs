//! services/api/src/adapters/contacts.rs
//!
//! Stand-in for a real contact-file parser. A production adapter would read
//! CSV/XLSX/TXT/JSON here; this one ignores the payload entirely and returns
//! a fixed three-row list, which is all the demo product ever "parses".

use async_trait::async_trait;
use callhub_core::domain::Contact;
use callhub_core::ports::{ContactListParser, PortResult};
use tracing::info;

pub struct FixtureContactParser;

#[async_trait]
impl ContactListParser for FixtureContactParser {
    async fn parse(&self, file_name: &str, _payload: &[u8]) -> PortResult<Vec<Contact>> {
        let contacts = vec![
            Contact {
                name: "John Doe".to_string(),
                phone: "+1234567890".to_string(),
                email: "john@example.com".to_string(),
            },
            Contact {
                name: "Jane Smith".to_string(),
                phone: "+1234567891".to_string(),
                email: "jane@example.com".to_string(),
            },
            Contact {
                name: "Bob Johnson".to_string(),
                phone: "+1234567892".to_string(),
                email: "bob@example.com".to_string(),
            },
        ];
        info!("Parsed {} contacts from {}", contacts.len(), file_name);
        Ok(contacts)
    }
}

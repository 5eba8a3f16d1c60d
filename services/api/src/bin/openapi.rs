//! services/api/src/bin/openapi.rs
//!
//! Dumps the OpenAPI 3.0 specification for the CallHub API to disk, so the
//! spec can be committed or fed to client generators without starting the
//! server.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // An optional first argument overrides the output path.
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());

    let spec = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(&path, spec)?;
    println!("✅ OpenAPI specification generated at {}", path);
    Ok(())
}

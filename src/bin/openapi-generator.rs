//! Print the backend's OpenAPI document; pass `--yaml` for YAML instead of JSON.

use apitalk_back::services::documentation::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let doc = ApiDoc::openapi();
    let as_yaml = std::env::args().skip(1).any(|arg| arg == "--yaml");

    if as_yaml {
        print!("{}", serde_yaml::to_string(&doc)?);
    } else {
        println!("{}", doc.to_pretty_json()?);
    }

    Ok(())
}

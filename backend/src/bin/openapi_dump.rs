//! Print the OpenAPI document as JSON.

use utoipa::OpenApi;
use wellf::doc::ApiDoc;

fn main() -> std::io::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(std::io::Error::other)?;
    println!("{json}");
    Ok(())
}

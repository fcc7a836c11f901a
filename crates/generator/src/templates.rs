//! Template loading and management

use apicanon_common::{CanonError, Result};
use tera::Tera;

/// Load the code-target templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.add_raw_template("curl", include_str!("../templates/curl.tera"))
        .map_err(|e| CanonError::Generation(format!("Failed to load curl template: {}", e)))?;

    tera.add_raw_template("http", include_str!("../templates/http.tera"))
        .map_err(|e| CanonError::Generation(format!("Failed to load http template: {}", e)))?;

    tera.add_raw_template("javascript", include_str!("../templates/javascript.tera"))
        .map_err(|e| {
            CanonError::Generation(format!("Failed to load javascript template: {}", e))
        })?;

    tera.add_raw_template("python", include_str!("../templates/python.tera"))
        .map_err(|e| CanonError::Generation(format!("Failed to load python template: {}", e)))?;

    Ok(tera)
}

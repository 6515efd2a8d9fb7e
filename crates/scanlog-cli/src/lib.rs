pub mod terminal;

use scanlog_core::GeoFix;

/// Parse `LAT,LON,ALT,ACC` into a position fix.
pub fn parse_geo_fix(raw: &str) -> Result<GeoFix, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(format!(
            "expected LAT,LON,ALT,ACC (4 values), got {}",
            parts.len()
        ));
    }
    let mut values = [0.0f64; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid number '{}': {}", part, e))?;
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(format!("non-finite value: {}", bad));
    }
    let [latitude, longitude, altitude, accuracy] = values;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(format!(
            "coordinates out of range: {}, {}",
            latitude, longitude
        ));
    }
    Ok(GeoFix {
        latitude,
        longitude,
        altitude,
        accuracy,
    })
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

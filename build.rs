use shadow_rs::BuildPattern;
use shadow_rs::ShadowBuilder;
use shadow_rs::ShadowError;

fn main() -> Result<(), ShadowError> {
    // Exposes `gps_search::build::CLAP_LONG_VERSION` for the driver.
    ShadowBuilder::builder()
        .build_pattern(BuildPattern::Lazy)
        .deny_const(Default::default())
        .build()?;

    Ok(())
}

use pii_obfuscator::config::load_s3_config;

#[test]
fn region_defaults_and_env_overrides() {
    std::env::remove_var("AWS_REGION");
    std::env::remove_var("AWS_DEFAULT_REGION");
    let cfg = load_s3_config().unwrap();
    assert_eq!(cfg.region, "us-east-1");

    std::env::set_var("AWS_DEFAULT_REGION", "eu-west-2");
    let cfg = load_s3_config().unwrap();
    assert_eq!(cfg.region, "eu-west-2");

    // AWS_REGION takes precedence over AWS_DEFAULT_REGION.
    std::env::set_var("AWS_REGION", "eu-west-1");
    let cfg = load_s3_config().unwrap();
    assert_eq!(cfg.region, "eu-west-1");

    std::env::remove_var("AWS_REGION");
    std::env::remove_var("AWS_DEFAULT_REGION");
}

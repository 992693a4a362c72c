use super::*;
use crate::foundation::core::DurationMs;

#[test]
fn defaults_validate() {
    MotionConfig::default().validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let json = r#"{
        "reveal": { "settle_delay": 250, "intro_timeout": 8000 },
        "carousel": { "interval": 3000 },
        "tilt": { "gate": "subject_settled" }
    }"#;
    let config = MotionConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(config.reveal.settle_delay, DurationMs(250));
    assert_eq!(config.reveal.headline_delay, DurationMs(600));
    assert_eq!(config.reveal.intro_timeout, Some(DurationMs(8_000)));
    assert_eq!(config.carousel.interval, DurationMs(3_000));
    assert_eq!(config.showcase.len(), 6);
    config.validate().unwrap();
}

#[test]
fn pretty_json_reads_back() {
    let config = MotionConfig::default();
    let json = config.to_json_pretty().unwrap();
    let back = MotionConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, config);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = MotionConfig::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(matches!(err, MotionError::Serde(_)));
}

#[test]
fn invalid_values_are_rejected() {
    let json = r#"{ "showcase": [] }"#;
    let config = MotionConfig::from_reader(json.as_bytes()).unwrap();
    assert!(matches!(config.validate(), Err(MotionError::Validation(_))));

    let json = r#"{ "sections": { "skills": { "opacity": { "input": [1, 0], "output": [0, 1] } } } }"#;
    let config = MotionConfig::from_reader(json.as_bytes()).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn fades_and_headline_are_configurable() {
    let json = r#"{
        "fades": { "tagline": { "hidden_y": -80 } },
        "sections": { "headline": { "words": ["Tools"], "interval": 1500 } }
    }"#;
    let config = MotionConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(config.fades.tagline.hidden_y, -80.0);
    assert_eq!(config.fades.music_player.delay, DurationMs(200));
    assert_eq!(config.sections.headline.words, ["Tools"]);
    assert_eq!(config.sections.headline.interval, DurationMs(1_500));
    config.validate().unwrap();

    let json = r#"{ "sections": { "headline": { "words": [] } } }"#;
    let config = MotionConfig::from_reader(json.as_bytes()).unwrap();
    assert!(matches!(config.validate(), Err(MotionError::Validation(_))));
}

#[test]
fn missing_file_is_reported() {
    let err = MotionConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("not/here.json"));
}

use super::model::*;

impl Default for BuzzerSettings {
    fn default() -> Self {
        Self {
            mute: false,
            length_ms: 1000,
            volume: 5,
        }
    }
}

impl Default for VibratorSettings {
    fn default() -> Self {
        Self {
            mute: false,
            length_ms: 500,
            count: 2,
            interval_ms: 100,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            image_size: 0,
            flash: 0,
            light_mode: 0,
        }
    }
}

impl Default for CommSettings {
    fn default() -> Self {
        Self {
            name: "docomo".to_string(),
            apn: "mopera.net".to_string(),
            user: String::new(),
            password: String::new(),
        }
    }
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            buzzer: BuzzerSettings::default(),
            vibrator: VibratorSettings::default(),
            camera: CameraSettings::default(),
            comm: CommSettings::default(),
            web_service: WebServiceUrls::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_terminal_factory_values() {
        let s = TerminalSettings::default();
        assert_eq!(s.buzzer.length_ms, 1000);
        assert_eq!(s.buzzer.volume, 5);
        assert_eq!(s.vibrator.count, 2);
        assert_eq!(s.comm.name, "docomo");
        assert_eq!(s.comm.apn, "mopera.net");
        assert_eq!(s.schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn vibration_pattern_starts_without_delay() {
        let v = VibratorSettings::default();
        assert_eq!(v.pattern(0), vec![0, 500, 100, 500]);
        assert_eq!(v.pattern(1).len(), 6);

        let zero = VibratorSettings { count: 0, ..v.clone() };
        assert_eq!(zero.pattern(0), vec![0, 500]);

        let muted = VibratorSettings { mute: true, ..v };
        assert!(muted.pattern(3).is_empty());
    }

    #[test]
    fn buzzer_volume_is_clamped() {
        let loud = BuzzerSettings { volume: 42, ..BuzzerSettings::default() };
        assert_eq!(loud.clamped_volume(), 10);
        assert_eq!(loud.tone_percent(), 100);
        let negative = BuzzerSettings { volume: -3, ..BuzzerSettings::default() };
        assert_eq!(negative.tone_percent(), 0);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let s: TerminalSettings =
            serde_json::from_str(r#"{"schema_version":1,"comm":{"CommName":"au","CommApn":"x","CommUser":"","CommPasswd":""}}"#)
                .unwrap();
        assert_eq!(s.comm.name, "au");
        assert_eq!(s.buzzer, BuzzerSettings::default());
    }
}

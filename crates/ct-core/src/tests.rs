//! Unit tests for ct-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgvId, CraneId, MessageId, TransporterId};

    #[test]
    fn index_roundtrip() {
        let id = AgvId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgvId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(TransporterId(0) < TransporterId(1));
        assert!(CraneId(10) > CraneId(9));
    }

    #[test]
    fn message_id_next() {
        assert_eq!(MessageId(7).next(), MessageId(8));
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(TransporterId(7).to_string(), "7");
    }
}

#[cfg(test)]
mod transport {
    use crate::{CraneKind, TransportType};

    #[test]
    fn parses_plain_and_wire_labels() {
        assert_eq!("road".parse::<TransportType>().unwrap(), TransportType::Road);
        assert_eq!("vrachtauto".parse::<TransportType>().unwrap(), TransportType::Road);
        assert_eq!("Trein".parse::<TransportType>().unwrap(), TransportType::Rail);
        assert_eq!("binnenschip".parse::<TransportType>().unwrap(), TransportType::InlandWater);
        assert_eq!(" zeeschip ".parse::<TransportType>().unwrap(), TransportType::Sea);
        assert!("zeppelin".parse::<TransportType>().is_err());
    }

    #[test]
    fn wire_label_parses_back() {
        for t in TransportType::ALL {
            assert_eq!(t.wire_label().parse::<TransportType>().unwrap(), t);
        }
    }

    #[test]
    fn index_matches_all_order() {
        for (i, t) in TransportType::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn crane_kind_table_is_consistent() {
        for t in TransportType::ALL {
            assert_eq!(CraneKind::serving(t).serves(), Some(t));
        }
        assert_eq!(CraneKind::StorageCrane.serves(), None);
        for (i, k) in CraneKind::ALL.iter().enumerate() {
            assert_eq!(k.index(), i);
        }
        let names: std::collections::BTreeSet<_> = CraneKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), CraneKind::ALL.len());
        assert_eq!(CraneKind::DockingCraneSea.wire_label(), CraneKind::DockingCraneInland.wire_label());
    }
}

#[cfg(test)]
mod time {
    use std::time::Duration;

    use crate::{SimClock, SimDate, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15).since(Tick(10)), 5);
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }

    #[test]
    fn epoch_is_unix_zero() {
        assert_eq!(SimDate::from_ymd_hms(1970, 1, 1, 0, 0, 0).unwrap().unix_millis(), 0);
    }

    #[test]
    fn known_date_round_trips() {
        let d = SimDate::from_ymd_hms(2004, 12, 1, 13, 45, 9).unwrap();
        assert_eq!(d.to_string(), "2004-12-01 13:45:09");
        assert_eq!(d.components(), (2004, 12, 1, 13, 45, 9));
    }

    #[test]
    fn leap_day_handled() {
        let d = SimDate::parse("2004-02-29 23:59").unwrap();
        assert_eq!(d.add_millis(60_000).to_string(), "2004-03-01 00:00:00");
        assert!(SimDate::parse("2005-02-29").is_err());
    }

    #[test]
    fn parse_variants() {
        let a = SimDate::parse("2004-12-01").unwrap();
        let b = SimDate::parse("2004-12-01 00:00").unwrap();
        let c = SimDate::parse("2004-12-01T00:00:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(SimDate::parse("2004-13-01").is_err());
        assert!(SimDate::parse("2004-12-01 24:00").is_err());
        assert!(SimDate::parse("yesterday").is_err());
    }

    #[test]
    fn clock_scales_wall_delta_by_speed() {
        let epoch = SimDate::parse("2004-12-01").unwrap();
        let mut clock = SimClock::new(epoch, 10.0);
        let added = clock.advance_by(Duration::from_millis(50));
        assert_eq!(added, 500);
        assert_eq!(clock.now().millis_since(epoch), 500);
    }

    #[test]
    fn clock_carries_fractions() {
        let epoch = SimDate::from_unix_millis(0);
        let mut clock = SimClock::new(epoch, 0.25);
        for _ in 0..4 {
            clock.advance_by(Duration::from_millis(1));
        }
        assert_eq!(clock.now().unix_millis(), 1);
    }

    #[test]
    fn set_speed_clamps() {
        let mut clock = SimClock::new(SimDate::default(), 1.0);
        clock.set_speed(-3.0);
        assert_eq!(clock.speed(), 0.0);
        clock.set_speed(f32::NAN);
        assert_eq!(clock.speed(), 0.0);
        clock.set_speed(4.0);
        assert_eq!(clock.speed(), 4.0);
    }

    #[test]
    fn initialize_resets_date_and_wall_tracking() {
        let mut clock = SimClock::new(SimDate::default(), 1.0);
        clock.advance();
        clock.advance_by(Duration::from_secs(3_600));
        std::thread::sleep(Duration::from_millis(200));

        let epoch = SimDate::parse("2004-12-01").unwrap();
        clock.initialize(epoch);
        assert_eq!(clock.now(), epoch);

        // Only the wall time since `initialize` counts, not the 200 ms before.
        let added = clock.advance();
        assert!(added < 200, "advanced {added} ms");
        assert_eq!(clock.now().millis_since(epoch), added);
    }

    #[test]
    fn default_epoch_matches_calendar() {
        let epoch = crate::TerminalConfig::default().epoch;
        assert_eq!(epoch, SimDate::parse("2004-12-01 00:00:00").unwrap());
        assert_eq!(epoch.to_string(), "2004-12-01 00:00:00");
    }

    #[test]
    fn out_of_range_millis_saturate() {
        let far = SimDate::from_unix_millis(0).add_millis(i64::MAX);
        assert!(far > SimDate::parse("9999-12-31").unwrap());
        assert!(SimDate::from_ymd_hms(2004, 2, 30, 0, 0, 0).is_none());
    }

    #[test]
    fn first_advance_only_starts_tracking() {
        let mut clock = SimClock::new(SimDate::default(), 1_000.0);
        assert_eq!(clock.advance(), 0);
    }
}

#[cfg(test)]
mod config {
    use crate::{CraneKind, SimDate, TerminalConfig, TransportType};

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = TerminalConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, TerminalConfig::default());
        assert_eq!(cfg.depots.get(TransportType::Road), 20);
        assert_eq!(cfg.depots.get(TransportType::Sea), 1);
        assert_eq!(cfg.cranes.get(CraneKind::StorageCrane), 12);
        assert_eq!(cfg.epoch, SimDate::parse("2004-12-01").unwrap());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = TerminalConfig::from_toml_str(
            r#"
            epoch = "2010-01-02 03:04"
            initial_speed = 25.0
            agv_count = 4

            [depots]
            road = 2
            rail = 1
            inland_water = 1
            sea = 1

            [cranes]
            storage = 2
            "#,
        )
        .unwrap();
        assert_eq!(cfg.epoch.to_string(), "2010-01-02 03:04:00");
        assert_eq!(cfg.initial_speed, 25.0);
        assert_eq!(cfg.agv_count, 4);
        assert_eq!(cfg.depots.get(TransportType::Road), 2);
        assert_eq!(cfg.cranes.get(CraneKind::StorageCrane), 2);
        // Unspecified crane kinds keep their defaults.
        assert_eq!(cfg.cranes.get(CraneKind::TruckCrane), 20);
    }

    #[test]
    fn invalid_values_rejected() {
        assert!(TerminalConfig::from_toml_str("agv_count = 0").is_err());
        assert!(TerminalConfig::from_toml_str("tick_interval_ms = 0").is_err());
        assert!(TerminalConfig::from_toml_str("initial_speed = -1.0").is_err());
        assert!(TerminalConfig::from_toml_str("epoch = \"not a date\"").is_err());
        assert!(TerminalConfig::from_toml_str("[cranes]\nstorage = 0").is_err());
    }
}

/// Satellite passes and visibility windows for the ISS
/// Uses the 2008-09-20 element set, propagated up to about ten days past its epoch
#[cfg(test)]
mod satellite_pass_tests {
    use astro_events::api::{
        next_satellite_pass, satellite_position, satellite_status, solar_system_position,
    };
    use astro_events::{AstroError, Planet, RiseSetStatus};

    const ISS_NAME: &str = "ISS (ZARYA)";
    const ISS_L1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_L2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";
    // 2008-09-20T12:25:40Z
    const EPOCH: f64 = 1_221_913_540.0;

    // London
    const LON: f64 = -0.1;
    const LAT: f64 = 51.5;
    const ALT: f64 = 35.0;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_next_pass_is_short_and_ordered() {
        init_logging();
        let pass = next_satellite_pass(ISS_NAME, ISS_L1, ISS_L2, LON, LAT, ALT, EPOCH).unwrap();
        assert_eq!(pass.pass.status, RiseSetStatus::Found);

        let rise = pass.pass.rise.unwrap().epoch_seconds();
        let set = pass.pass.set.unwrap().epoch_seconds();
        assert!(rise >= EPOCH - 10.0, "pass must lie ahead of the query");
        assert!(set > rise);
        let minutes = (set - rise) / 60.0;
        assert!(minutes < 20.0, "low orbit pass lasted {minutes} min");

        let transit = pass.pass.transit.unwrap();
        assert!(transit.altitude.unwrap() > 0.0);
        assert!(transit.epoch_seconds() >= rise && transit.epoch_seconds() <= set);
    }

    #[test]
    fn test_visible_windows_lie_inside_pass() {
        init_logging();
        // Walk through consecutive passes over about ten days
        let mut time = EPOCH;
        let mut windows = 0;
        for _ in 0..60 {
            let pass = next_satellite_pass(ISS_NAME, ISS_L1, ISS_L2, LON, LAT, ALT, time).unwrap();
            if pass.pass.status != RiseSetStatus::Found {
                break;
            }
            let rise = pass.pass.rise.unwrap().epoch_seconds();
            let set = pass.pass.set.unwrap().epoch_seconds();

            if let Some(window) = pass.visible {
                windows += 1;
                let start = window.rise.epoch_seconds();
                let end = window.set.epoch_seconds();
                assert!(rise - 1e-3 <= start && start <= end && end <= set + 1e-3);

                for edge in [window.rise, window.set] {
                    assert!(edge.altitude.unwrap() >= 10.0, "edge altitude {:?}", edge.altitude);
                    let sun = solar_system_position(Planet::Sun, LON, LAT, ALT, edge.epoch_seconds())
                        .unwrap();
                    assert!(
                        sun.altitude > -30.0 && sun.altitude < -6.0,
                        "sun at {} on a visible edge",
                        sun.altitude
                    );
                }
                let peak = window.peak.altitude.unwrap();
                assert!(peak >= window.rise.altitude.unwrap());
                assert!(peak >= window.set.altitude.unwrap());
            }
            time = set + 60.0;
        }
        // Ten days at this latitude always include sunlit passes in a dark sky
        assert!(windows > 0, "no visible window in 60 passes");
    }

    #[test]
    fn test_status_near_epoch() {
        init_logging();
        let status = satellite_status(ISS_NAME, ISS_L1, ISS_L2, EPOCH).unwrap();
        let height_km = status.elevation / 1000.0;
        assert!(height_km > 300.0 && height_km < 420.0, "height {height_km} km");
        assert!(status.latitude.abs() <= 52.0);
        assert!((-180.0..=180.0).contains(&status.longitude));
    }

    #[test]
    fn test_position_is_horizontal() {
        let pos = satellite_position(ISS_NAME, ISS_L1, ISS_L2, LON, LAT, ALT, EPOCH).unwrap();
        assert!((-90.0..=90.0).contains(&pos.altitude));
        assert!((0.0..360.0).contains(&pos.azimuth));
    }

    #[test]
    fn test_malformed_elements_are_rejected() {
        let err = next_satellite_pass("bad", "1 not a tle", "2 nor this", LON, LAT, ALT, EPOCH)
            .unwrap_err();
        assert!(matches!(err, AstroError::MalformedElements(_)), "got {err}");
    }
}

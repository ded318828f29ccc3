mod tests {
    use myrtio_mood_light::{
        ColorTemperature, FastRandom, FrameContext, Generator, Instant, RandomSource, Rgb,
        WarmConfig, color::scale_rgb_linear, generator::WarmLightGenerator,
    };

    /// Never redraws a target
    struct Quiet;

    impl RandomSource for Quiet {
        fn random_range(&mut self, lo: u16, hi: u16) -> u16 {
            if hi > lo { hi - 1 } else { lo }
        }
    }

    fn ctx(warm: WarmConfig) -> FrameContext {
        FrameContext {
            static_color: Rgb::default(),
            brightness: 50,
            warm,
            campfire_brightness_scaling: true,
        }
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_update_interval_follows_config() {
        let mut generator = WarmLightGenerator::<8>::new();
        let mut leds = [Rgb::default(); 8];
        let mut rng = FastRandom::with_seed(5);
        let ctx = ctx(WarmConfig::new(3000, 5, 220, 255, 120, 15));

        assert!(generator.step(at(0), &ctx, &mut rng, &mut leds));
        assert!(!generator.step(at(80), &ctx, &mut rng, &mut leds));
        assert!(!generator.step(at(119), &ctx, &mut rng, &mut leds));
        assert!(generator.step(at(120), &ctx, &mut rng, &mut leds));
    }

    #[test]
    fn test_colors_follow_temperature_and_intensity() {
        let warm = WarmConfig::new(4000, 30, 100, 200, 20, 4);
        let base = ColorTemperature::K4000.base_color();
        let mut generator = WarmLightGenerator::<16>::new();
        let mut leds = [Rgb::default(); 16];
        let mut rng = FastRandom::with_seed(9);

        for frame in 0..50 {
            generator.step(at(frame * 20), &ctx(warm), &mut rng, &mut leds);
            for (i, led) in leds.iter().enumerate() {
                assert_eq!(*led, scale_rgb_linear(base, generator.field().current(i)));
            }
        }
    }

    #[test]
    fn test_intensity_stays_in_configured_range() {
        let warm = WarmConfig::new(3000, 50, 100, 150, 20, 3);
        let mut generator = WarmLightGenerator::<24>::new();
        let mut leds = [Rgb::default(); 24];
        let mut rng = FastRandom::with_seed(21);

        for frame in 0..100 {
            generator.step(at(frame * 20), &ctx(warm), &mut rng, &mut leds);
            for i in 0..24 {
                let current = generator.field().current(i);
                let target = generator.field().target(i);
                assert!((100..=150).contains(&current));
                assert!((100..=150).contains(&target));
            }
        }
    }

    #[test]
    fn test_not_scaled_by_global_brightness() {
        let warm = WarmConfig::new(2000, 5, 0, 255, 20, 15);
        let mut generator = WarmLightGenerator::<2>::new();
        generator.field_mut().set(0, 255, 255);
        generator.field_mut().set(1, 255, 255);
        let mut leds = [Rgb::default(); 2];

        let mut dim = ctx(warm);
        dim.brightness = 1;
        generator.step(at(0), &dim, &mut Quiet, &mut leds);
        assert_eq!(leds[0], Rgb { r: 255, g: 147, b: 41 });
    }

    #[test]
    fn test_low_targets_skip_diffusion() {
        let warm = WarmConfig::new(3000, 5, 0, 255, 20, 15);
        let mut generator = WarmLightGenerator::<3>::new();
        generator.field_mut().set(0, 200, 200);
        generator.field_mut().set(1, 40, 40);
        generator.field_mut().set(2, 200, 200);
        let mut leds = [Rgb::default(); 3];

        generator.step(at(0), &ctx(warm), &mut Quiet, &mut leds);
        assert_eq!(generator.field().current(1), 40);
    }

    #[test]
    fn test_diffusion_is_nine_to_one() {
        let warm = WarmConfig::new(3000, 5, 0, 255, 20, 15);
        let mut generator = WarmLightGenerator::<3>::new();
        generator.field_mut().set(0, 0, 0);
        generator.field_mut().set(1, 200, 200);
        generator.field_mut().set(2, 0, 0);
        let mut leds = [Rgb::default(); 3];

        generator.step(at(0), &ctx(warm), &mut Quiet, &mut leds);
        // (200 * 9 + 0) / 10
        assert_eq!(generator.field().current(1), 180);
        assert_eq!(generator.field().current(0), 0);
    }

    #[test]
    fn test_smoothing_uses_configured_divisor() {
        let warm = WarmConfig::new(3000, 5, 0, 255, 20, 4);
        let mut generator = WarmLightGenerator::<2>::new();
        generator.field_mut().set(0, 100, 200);
        let mut leds = [Rgb::default(); 2];

        generator.step(at(0), &ctx(warm), &mut Quiet, &mut leds);
        assert_eq!(generator.field().current(0), 125);
        generator.step(at(20), &ctx(warm), &mut Quiet, &mut leds);
        assert_eq!(generator.field().current(0), 143);
    }
}

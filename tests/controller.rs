mod tests {
    use myrtio_mood_light::{
        AnimationState, ByteStorage, ConfigStore, ControlError, ControllerConfig, FastRandom,
        GlobalConfig, InputEvent, Instant, IntentChannel, LightIntent, MemoryStorage, Mode,
        ModeController, RenderingBounds, Rgb, Status, StorageError, WarmConfig,
        color::scale_rgb_linear,
        generator::ChristmasPhase,
        store::CONFIG_STORAGE_SIZE,
    };

    const LEDS: usize = 12;

    type Storage = MemoryStorage<CONFIG_STORAGE_SIZE>;
    type Controller = ModeController<Storage, FastRandom, LEDS>;

    /// Memory storage whose n-th write after arming fails
    #[derive(Default)]
    struct FlakyStorage {
        inner: Storage,
        writes: usize,
        fail_at: Option<usize>,
    }

    impl FlakyStorage {
        fn fail_on_write(&mut self, n: usize) {
            self.writes = 0;
            self.fail_at = Some(n);
        }
    }

    impl ByteStorage for FlakyStorage {
        fn read(&self, address: usize) -> Result<u8, StorageError> {
            self.inner.read(address)
        }

        fn write(&mut self, address: usize, value: u8) -> Result<(), StorageError> {
            self.writes += 1;
            if self.fail_at == Some(self.writes) {
                return Err(StorageError::DriverError);
            }
            self.inner.write(address, value)
        }

        fn commit(&mut self) -> Result<(), StorageError> {
            self.inner.commit()
        }

        fn discard(&mut self) {
            self.inner.discard();
        }
    }

    fn controller() -> Controller {
        controller_with(&ControllerConfig::default())
    }

    fn controller_with(options: &ControllerConfig) -> Controller {
        ModeController::new(
            ConfigStore::new(Storage::new()),
            FastRandom::with_seed(42),
            options,
        )
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn christmas_phase(controller: &Controller) -> Option<ChristmasPhase> {
        match controller.animation_state() {
            Some(AnimationState::Christmas(generator)) => Some(generator.phase()),
            _ => None,
        }
    }

    #[test]
    fn test_starts_with_defaults_on_pristine_storage() {
        let controller = controller();
        assert_eq!(
            controller.get_status(),
            Status {
                mode: Mode::WarmLight,
                color: Rgb { r: 255, g: 255, b: 255 },
                brightness: 50,
            }
        );
        assert_eq!(controller.get_warm_config(), WarmConfig::default());
        assert!(controller.animation_state().is_none());
    }

    #[test]
    fn test_starts_with_persisted_config() {
        let mut store = ConfigStore::new(Storage::new());
        let saved = GlobalConfig {
            mode: Mode::Beatsin,
            static_color: Rgb { r: 10, g: 20, b: 30 },
            brightness: 77,
            warm: WarmConfig::new(6000, 10, 30, 90, 40, 2),
        };
        store.save(&saved).unwrap();

        let controller: Controller =
            ModeController::new(store, FastRandom::with_seed(1), &ControllerConfig::default());
        assert_eq!(controller.config(), &saved);
    }

    #[test]
    fn test_unreadable_storage_falls_back_to_defaults() {
        let store = ConfigStore::with_base_address(Storage::new(), 64);
        let controller: Controller =
            ModeController::new(store, FastRandom::with_seed(1), &ControllerConfig::default());
        assert_eq!(controller.config(), &GlobalConfig::default());
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        let mut controller = controller();
        controller.set_mode(0).unwrap();
        let commits = controller.store().storage().commit_count();

        assert_eq!(controller.set_mode(5), Err(ControlError::InvalidMode(5)));
        assert_eq!(controller.mode(), Mode::Normal);
        assert_eq!(controller.store().storage().commit_count(), commits);
    }

    #[test]
    fn test_set_mode_persists() {
        let mut controller = controller();
        controller.set_mode(1).unwrap();
        assert_eq!(controller.mode(), Mode::Campfire);
        assert_eq!(controller.store().load().unwrap().mode, Mode::Campfire);
    }

    #[test]
    fn test_setters_persist() {
        let mut controller = controller();
        controller.set_static_color(1, 2, 3).unwrap();
        controller.set_brightness(200).unwrap();

        let stored = controller.store().load().unwrap();
        assert_eq!(stored.static_color, Rgb { r: 1, g: 2, b: 3 });
        assert_eq!(stored.brightness, 200);
        assert_eq!(controller.store().storage().commit_count(), 2);
    }

    #[test]
    fn test_warm_config_is_clamped() {
        let mut controller = controller();
        controller
            .set_warm_config(WarmConfig::new(2700, 0, 200, 100, 500, 40))
            .unwrap();

        let warm = controller.get_warm_config();
        assert_eq!(warm.update_speed_ms(), 200);
        assert_eq!(warm.change_chance(), 1);
        assert_eq!(warm.smoothness(), 20);
        assert_eq!(warm.max_brightness(), 200);
        assert_eq!(
            warm.color_temperature(),
            myrtio_mood_light::ColorTemperature::K3000
        );
        assert_eq!(controller.store().load().unwrap().warm, warm);
    }

    #[test]
    fn test_set_config_replaces_everything() {
        let mut controller = controller();
        let config = GlobalConfig {
            mode: Mode::Normal,
            static_color: Rgb { r: 0, g: 128, b: 0 },
            brightness: 255,
            warm: WarmConfig::new(4000, 20, 10, 20, 30, 3),
        };
        controller.set_config(config).unwrap();

        assert_eq!(controller.config(), &config);
        assert_eq!(controller.store().load().unwrap(), config);
    }

    #[test]
    fn test_status_is_a_snapshot() {
        let mut controller = controller();
        let status = controller.get_status();
        controller.set_brightness(10).unwrap();

        assert_eq!(status.brightness, 50);
        assert_eq!(controller.get_status().brightness, 10);
    }

    #[test]
    fn test_persistence_failure_keeps_live_state() {
        let mut controller = controller();
        controller.store_mut().storage_mut().set_fail_writes(true);

        assert_eq!(controller.set_brightness(80), Err(StorageError::DriverError));
        assert_eq!(controller.get_status().brightness, 80);
        assert_eq!(
            controller.set_mode(0),
            Err(ControlError::Storage(StorageError::DriverError))
        );
        assert_eq!(controller.mode(), Mode::Normal);
    }

    #[test]
    fn test_normal_mode_frame() {
        let mut controller = controller();
        controller.set_mode(0).unwrap();
        controller.set_static_color(255, 128, 0).unwrap();

        assert!(controller.tick(at(0)));
        let expected = scale_rgb_linear(Rgb { r: 255, g: 128, b: 0 }, 50);
        assert!(controller.frame().iter().all(|led| *led == expected));
        assert!(controller.tick(at(1)));
    }

    #[test]
    fn test_rendering_bounds_keep_outer_pixels_dark() {
        let options = ControllerConfig {
            bounds: Some(RenderingBounds { start: 2, end: 9 }),
            ..ControllerConfig::default()
        };
        let mut controller = controller_with(&options);
        controller.set_mode(0).unwrap();
        controller.tick(at(0));

        let lit = Rgb { r: 50, g: 50, b: 50 };
        for (i, led) in controller.frame().iter().enumerate() {
            if (2..9).contains(&i) {
                assert_eq!(*led, lit);
            } else {
                assert_eq!(*led, Rgb::default());
            }
        }
    }

    #[test]
    fn test_bounds_are_clamped_to_strip() {
        let options = ControllerConfig {
            bounds: Some(RenderingBounds { start: 4, end: 100 }),
            ..ControllerConfig::default()
        };
        let controller = controller_with(&options);
        assert_eq!(controller.bounds(), RenderingBounds { start: 4, end: LEDS });
        assert_eq!(controller.bounds().count(), 8);
    }

    #[test]
    fn test_state_is_created_lazily_on_tick() {
        let mut controller = controller();
        controller.set_mode(2).unwrap();
        assert!(controller.animation_state().is_none());

        controller.tick(at(0));
        assert_eq!(
            controller.animation_state().map(AnimationState::mode),
            Some(Mode::Christmas)
        );
    }

    #[test]
    fn test_switching_away_and_back_restarts_the_mode() {
        let mut controller = controller();
        controller.set_mode(2).unwrap();
        for frame in 0..=12 {
            controller.tick(at(frame * 250));
        }
        assert_eq!(christmas_phase(&controller), Some(ChristmasPhase::GreenDominant));

        controller.set_mode(0).unwrap();
        controller.tick(at(3_300));
        controller.set_mode(2).unwrap();
        controller.tick(at(3_400));
        assert_eq!(christmas_phase(&controller), Some(ChristmasPhase::RedDominant));
    }

    #[test]
    fn test_reselecting_active_mode_keeps_state() {
        let mut controller = controller();
        controller.set_mode(2).unwrap();
        for frame in 0..=12 {
            controller.tick(at(frame * 250));
        }
        let commits = controller.store().storage().commit_count();

        controller.set_mode(2).unwrap();
        assert_eq!(christmas_phase(&controller), Some(ChristmasPhase::GreenDominant));
        assert_eq!(controller.store().storage().commit_count(), commits + 1);
    }

    #[test]
    fn test_rotary_input_steps_brightness() {
        let mut controller = controller();
        controller.handle_input(InputEvent::RotateClockwise).unwrap();
        assert_eq!(controller.get_status().brightness, 75);

        controller.set_brightness(140).unwrap();
        controller.handle_input(InputEvent::RotateClockwise).unwrap();
        assert_eq!(controller.get_status().brightness, 150);

        controller.set_brightness(10).unwrap();
        controller
            .handle_input(InputEvent::RotateCounterClockwise)
            .unwrap();
        assert_eq!(controller.get_status().brightness, 0);
        assert_eq!(controller.store().load().unwrap().brightness, 0);
    }

    #[test]
    fn test_press_cycles_modes() {
        let mut controller = controller();
        controller.handle_input(InputEvent::Press).unwrap();
        assert_eq!(controller.mode(), Mode::Beatsin);
        controller.handle_input(InputEvent::Press).unwrap();
        assert_eq!(controller.mode(), Mode::Normal);
        assert_eq!(controller.store().load().unwrap().mode, Mode::Normal);
    }

    #[test]
    fn test_process_intents() {
        let channel = IntentChannel::<8>::new();
        let sender = channel.sender();
        sender.try_send(LightIntent::SetBrightness(10)).unwrap();
        sender.try_send(LightIntent::SetMode(9)).unwrap();
        sender.try_send(LightIntent::SetMode(1)).unwrap();
        sender
            .try_send(LightIntent::SetStaticColor(Rgb { r: 9, g: 8, b: 7 }))
            .unwrap();
        sender
            .try_send(LightIntent::Input(InputEvent::RotateClockwise))
            .unwrap();

        let mut controller = controller();
        assert_eq!(controller.process_intents(&channel.receiver()), 5);
        assert_eq!(
            controller.get_status(),
            Status {
                mode: Mode::Campfire,
                color: Rgb { r: 9, g: 8, b: 7 },
                brightness: 35,
            }
        );
        assert_eq!(controller.process_intents(&channel.receiver()), 0);
    }

    #[test]
    fn test_apply_intent_reports_invalid_mode() {
        let mut controller = controller();
        assert_eq!(
            controller.apply_intent(LightIntent::SetMode(200)),
            Err(ControlError::InvalidMode(200))
        );
        assert_eq!(controller.mode(), Mode::WarmLight);
    }

    #[test]
    fn test_warm_light_trends_to_2000k_ratio() {
        let mut controller = controller();
        controller.set_mode(Mode::WarmLight.as_raw()).unwrap();
        controller
            .set_warm_config(WarmConfig::new(2000, 100, 0, 255, 20, 1))
            .unwrap();

        let base = Rgb { r: 255, g: 147, b: 41 };
        let mut redraws = 0;
        for ms in (0..=1_200).step_by(5) {
            if controller.tick(at(ms)) {
                redraws += 1;
            }
            for led in controller.frame() {
                assert!(led.r <= base.r && led.g <= base.g && led.b <= base.b);
                assert_eq!(*led, scale_rgb_linear(base, led.r));
            }
        }
        // Redraws every 20 ms
        assert_eq!(redraws, 61);
    }

    #[test]
    fn test_failed_warm_save_does_not_leak_into_next_save() {
        let mut controller: ModeController<FlakyStorage, FastRandom, LEDS> =
            ModeController::new(
                ConfigStore::new(FlakyStorage::default()),
                FastRandom::with_seed(3),
                &ControllerConfig::default(),
            );
        controller.set_brightness(60).unwrap();

        let attempted = WarmConfig::new(6000, 77, 10, 20, 30, 2);
        controller.store_mut().storage_mut().fail_on_write(4);
        assert_eq!(
            controller.set_warm_config(attempted),
            Err(StorageError::DriverError)
        );
        assert_eq!(controller.get_warm_config(), attempted);

        controller.set_brightness(9).unwrap();
        let stored = controller.store().load().unwrap();
        assert_eq!(stored.brightness, 9);
        assert_eq!(stored.warm, WarmConfig::default());
    }
}

use game_core::*;
use glam::Vec2;

/// Never moves
struct Still;

impl Policy for Still {
    fn activate(&self, _inputs: &[f32]) -> Vec<f32> {
        vec![1.0, 0.0, 0.0]
    }
}

fn inert_match(config: &Config, mode: MatchMode) -> Match<'_> {
    Match::new(
        config,
        mode,
        Box::new(NoOpController),
        Box::new(NoOpController),
        GameRng::new(2024),
    )
    .unwrap()
}

fn ticks_until_left_scores(speed: u32) -> u64 {
    let config = Config::new();
    let mut game = inert_match(&config, MatchMode::Training);
    game.place_ball(Ball::new(Vec2::new(350.0, 250.0), 10.0, speed, Vec2::new(1.0, 0.0)));
    // Right paddle parked at the top, out of the ball's row
    game.place_paddle(Side::Right, 0.0);

    loop {
        let outcome = game.tick(&FrameInput::idle());
        if let Some(scorer) = outcome.events.scorer() {
            assert_eq!(scorer, Side::Left);
            assert_eq!(game.score(), Score { left: 1, right: 0 });
            assert_eq!(outcome.state, MatchState::Ended(EndReason::Scored(Side::Left)));
            return game.ticks();
        }
        assert!(game.ticks() < 1000, "ball never scored");
    }
}

#[test]
fn test_ball_crosses_field_and_scores_for_left() {
    assert_eq!(ticks_until_left_scores(10), 34);
    assert_eq!(ticks_until_left_scores(5), 68);
}

#[test]
fn test_crossing_left_wall_scores_once_for_right() {
    let config = Config::new();
    let mut game = inert_match(&config, MatchMode::Play);
    game.place_ball(Ball::new(Vec2::new(12.0, 40.0), 10.0, 6, Vec2::new(-1.0, 1.0)));

    let outcome = game.tick(&FrameInput::idle());

    assert!(outcome.events.right_scored);
    assert!(!outcome.events.left_scored);
    assert_eq!(game.score(), Score { left: 0, right: 1 });
    // Exactly one reset: ball back at the centre with a fresh launch
    let ball = game.ball();
    assert_eq!(ball.pos, config.field_center());
    assert!((config.ball_speed_low..=config.ball_speed_high).contains(&ball.speed));

    // Next tick starts from the centre; no second score
    let outcome = game.tick(&FrameInput::idle());
    assert_eq!(outcome.events.scorer(), None);
    assert_eq!(game.score(), Score { left: 0, right: 1 });
}

#[test]
fn test_human_both_keys_pressed_cancel_out() {
    let config = Config::new();
    let mut game = Match::new(
        &config,
        MatchMode::Play,
        Box::new(HumanController::left()),
        Box::new(HumanController::right()),
        GameRng::new(5),
    )
    .unwrap();
    let before = [game.paddle(Side::Left).y, game.paddle(Side::Right).y];
    let input = FrameInput {
        quit: false,
        keys: KeyState::with_pressed(&[Key::W, Key::S, Key::ArrowUp, Key::ArrowDown]),
    };

    game.tick(&input);

    assert_eq!(game.paddle(Side::Left).y, before[0]);
    assert_eq!(game.paddle(Side::Right).y, before[1]);
}

#[test]
fn test_training_cutoff_ends_match_at_fiftieth_hit() {
    let config = Config::new();
    let mut game = Match::new(
        &config,
        MatchMode::Training,
        Box::new(PolicyController::new(Still, config.observation)),
        Box::new(PolicyController::new(Still, config.observation)),
        GameRng::new(6),
    )
    .unwrap();
    // Flat rally between two centred paddles
    game.place_ball(Ball::new(config.field_center(), 10.0, 7, Vec2::new(1.0, 0.0)));

    let mut last_max = 0;
    while game.is_running() {
        let outcome = game.tick(&FrameInput::idle());
        let hits = [game.paddle(Side::Left).hits, game.paddle(Side::Right).hits];
        let max = hits[0].max(hits[1]);
        assert_eq!(outcome.events.scorer(), None, "rally should never score");
        if max < config.hit_cutoff {
            assert!(game.is_running(), "ended before the cutoff");
        }
        last_max = max;
    }

    assert_eq!(game.state(), MatchState::Ended(EndReason::HitCutoff));
    assert_eq!(last_max, config.hit_cutoff);
    assert_eq!(game.score(), Score::new());
}

#[test]
fn test_paddles_stay_in_field_for_whole_match() {
    let config = Config::new();
    let mut rng = GameRng::new(77);
    let left = FeedForwardNet::new_random(3, 6, 3, &mut rng);
    let right = FeedForwardNet::new_random(3, 6, 3, &mut rng);
    let mut game = Match::new(
        &config,
        MatchMode::Training,
        Box::new(PolicyController::new(&left, config.observation)),
        Box::new(PolicyController::new(&right, config.observation)),
        rng,
    )
    .unwrap();

    while game.is_running() {
        game.tick(&FrameInput::idle());
        for side in Side::BOTH {
            let y = game.paddle(side).y;
            assert!(y >= 0.0 && y <= config.field_height - config.paddle_height);
        }
    }
}

#[test]
fn test_wall_bounce_only_flips_vertical_velocity() {
    let config = Config::new();
    let mut game = inert_match(&config, MatchMode::Play);
    game.place_ball(Ball::new(Vec2::new(350.0, 488.0), 10.0, 8, Vec2::new(-1.0, 1.0)));

    let outcome = game.tick(&FrameInput::idle());

    assert!(outcome.events.ball_hit_wall);
    assert_eq!(game.ball().vel, Vec2::new(-8.0, -8.0));
}

#[test]
fn test_tournament_is_reproducible() {
    let config = Config::new();
    let build = || {
        let mut rng = GameRng::new(31);
        (0..4)
            .map(|i| Genome::new(i, FeedForwardNet::new_random(3, 5, 3, &mut rng)))
            .collect::<Vec<_>>()
    };
    let tournament = TournamentConfig {
        seed: 99,
        ..TournamentConfig::default()
    };

    let mut first = build();
    let mut second = build();
    let a = evaluate_generation(&mut first, &config, &tournament).unwrap();
    let b = evaluate_generation(&mut second, &config, &tournament).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.pairs.len(), 6);
    assert!(a.best.is_some());
}

#[test]
fn test_extended_observation_feeds_five_inputs() {
    struct NeedsFive;

    impl Policy for NeedsFive {
        fn activate(&self, inputs: &[f32]) -> Vec<f32> {
            assert_eq!(inputs.len(), 5);
            vec![0.0, 1.0, 0.0]
        }
    }

    let config = Config {
        observation: ObservationKind::Extended,
        ..Config::new()
    };
    let mut game = Match::new(
        &config,
        MatchMode::Training,
        Box::new(PolicyController::from_config(NeedsFive, &config)),
        Box::new(NoOpController),
        GameRng::new(3),
    )
    .unwrap();

    let outcome = game.tick(&FrameInput::idle());

    assert_eq!(outcome.decisions, [Decision::Up, Decision::NoOp]);
}

#[test]
fn test_rejected_configs_never_reach_the_simulation() {
    let configs = [
        Config {
            paddle_height: 600.0,
            ..Config::new()
        },
        Config {
            ball_speed_low: 9,
            ball_speed_high: 6,
            ..Config::new()
        },
        Config {
            ball_speed_low: 0,
            ..Config::new()
        },
    ];

    for config in &configs {
        assert!(config.validate().is_err());
        let built = Match::new(
            config,
            MatchMode::Training,
            Box::new(NoOpController),
            Box::new(NoOpController),
            GameRng::new(11),
        );
        assert_eq!(built.err(), config.validate().err());

        let mut genomes = vec![Genome::new(0, Still), Genome::new(1, Still)];
        let report = evaluate_generation(&mut genomes, config, &TournamentConfig::default());
        assert!(report.is_err());
    }
}

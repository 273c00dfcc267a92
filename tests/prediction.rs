use hdpredict::{
    harness, Checkpoint, Codebook, HdcError, Hypervector, HypervectorSpace, ItemMemory,
    Prediction, PredictorConfig, SequencePredictor, Strategy,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

const HISTORY: [&str; 8] = ["y", "y", "n", "y", "y", "n", "y", "y"];

fn predictor(strategy: Strategy) -> SequencePredictor<&'static str> {
    let config = PredictorConfig::default()
        .with_dimension(10_000)
        .with_context_size(3)
        .with_strategy(strategy)
        .with_seed(0x5eed);
    SequencePredictor::from_config(config, ["y", "n"]).unwrap()
}

fn perturb(v: &Hypervector, fraction: f64, rng: &mut ChaCha8Rng) -> Hypervector {
    let bits = v
        .bits()
        .iter()
        .map(|&b| if rng.gen_bool(fraction) { 1 - b } else { b })
        .collect();
    Hypervector::from_bits(bits).unwrap()
}

#[test]
fn repeating_pattern_end_to_end() {
    for strategy in [Strategy::Running, Strategy::Batch, Strategy::BatchDeduplicated] {
        let mut p = predictor(strategy);

        for &actual in &HISTORY[..3] {
            let guess = p.predict_next().unwrap();
            assert!(guess.is_fallback());
            assert!(["y", "n"].contains(guess.symbol()));
            p.observe(actual).unwrap();
        }

        let h = p.encode_history(3).unwrap();
        let q = p.make_query(3).unwrap();
        assert_eq!(p.predict(&h, &q).unwrap(), "y", "{:?} at i=3", strategy);

        for &actual in &HISTORY[3..6] {
            p.observe(actual).unwrap();
        }
        assert_eq!(p.gram_count(), 4);

        // Same last k-1 symbols as at i=3
        assert_eq!(
            p.predict_next().unwrap(),
            Prediction::Decoded("y"),
            "{:?} at i=6",
            strategy
        );
    }
}

#[test]
fn harness_matches_manual_steps() {
    let mut driven = predictor(Strategy::Running);
    let report = harness::run(&mut driven, HISTORY).unwrap();

    let mut manual = predictor(Strategy::Running);
    let mut predictions = Vec::new();
    for actual in HISTORY {
        predictions.push(manual.predict_next().unwrap().into_symbol());
        manual.observe(actual).unwrap();
    }

    assert_eq!(report.predictions, predictions);
    assert_eq!(report.fallback_steps, 3);
    assert_eq!(report.accuracies.len(), HISTORY.len());
}

#[test]
fn codebook_is_stable_across_unrelated_adds() {
    let space = HypervectorSpace::new(1024).unwrap();
    let mut cb = Codebook::new(space, 9);
    let x = cb.add("x".to_string()).clone();
    for i in 0..50 {
        cb.add(format!("other-{}", i));
    }
    cb.add("x".to_string());
    assert_eq!(cb.get(&"x".to_string()).unwrap(), &x);
}

#[test]
fn fresh_codebook_self_decodes() {
    let space = HypervectorSpace::new(10_000).unwrap();
    let mut cb = Codebook::new(space, 1);
    let symbols = ["a", "b", "c", "d", "e"];
    for s in symbols {
        cb.add(s);
    }
    for s in symbols {
        let v = cb.get(&s).unwrap().clone();
        assert_eq!(cb.winner_take_all(&v).unwrap(), s);
    }
}

#[test]
fn threshold_match_returns_near_pair() {
    let space = HypervectorSpace::new(10_000).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(17);

    let a = space.sample(&mut rng);
    let b = perturb(&a, 0.05, &mut rng);
    let c = space.sample(&mut rng);
    assert!(space.distance(&a, &b).unwrap() <= 0.1);

    let mut memory = ItemMemory::new(space);
    memory.add("A", a.clone()).unwrap();
    memory.add("B", b).unwrap();
    memory.add("C", c).unwrap();

    let query = perturb(&a, 0.02, &mut rng);
    let found: BTreeSet<_> = memory.matches(&query, 0.15).unwrap().into_keys().collect();
    assert_eq!(found, BTreeSet::from(["A", "B"]));
}

#[test]
fn checkpoint_resume_runs_in_lockstep() {
    let trace: Vec<&str> = HISTORY.repeat(3);
    let (head, tail) = trace.split_at(5);

    for strategy in [Strategy::Running, Strategy::Batch] {
        let mut live = predictor(strategy);
        harness::run(&mut live, head.iter().copied()).unwrap();

        let path = std::env::temp_dir().join(format!("hdpredict_resume_{:?}.json", strategy));
        live.checkpoint().unwrap().save(&path).unwrap();
        let loaded: Checkpoint<String> = Checkpoint::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let history: Vec<String> = head.iter().map(|s| s.to_string()).collect();
        let mut resumed = SequencePredictor::resume(loaded, history).unwrap();
        assert_eq!(resumed.seed(), live.seed());

        for &actual in tail {
            let expected = live.predict_next().unwrap();
            let got = resumed.predict_next().unwrap();
            assert_eq!(got.symbol().as_str(), *expected.symbol());
            assert_eq!(got.is_fallback(), expected.is_fallback());

            live.observe(actual).unwrap();
            resumed.observe(actual.to_string()).unwrap();
        }
    }
}

#[test]
fn resume_replays_warmup_fallbacks() {
    let mut live = predictor(Strategy::Running);
    live.predict_next().unwrap();
    live.observe("y").unwrap();

    let history = live.history().as_slice().to_vec();
    let checkpoint = live.checkpoint().unwrap();
    let mut resumed = SequencePredictor::resume(checkpoint, history).unwrap();

    for _ in 0..10 {
        assert_eq!(resumed.fallback(), live.fallback());
    }
}

#[test]
fn resume_rejects_foreign_symbol() {
    let mut live = predictor(Strategy::Batch);
    live.observe("y").unwrap();

    let result = SequencePredictor::resume(live.checkpoint().unwrap(), ["maybe"]);
    assert!(matches!(result, Err(HdcError::KeyNotFound(_))));
}

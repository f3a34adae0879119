use std::io::Cursor;

use charlm_core::{CharLmError, LanguageModel, ModelConfig};

const CORPUS: &str = "Whan that Aprille with his shoures soote\n\
The droghte of March hath perced to the roote,\n\
And bathed every veyne in swich licour\n\
Of which vertu engendred is the flour;\n\
Whan Zephirus eek with his sweete breeth\n\
Inspired hath in every holt and heeth\n";

fn trained(config: &ModelConfig) -> LanguageModel {
	let mut model = LanguageModel::from_config(config).unwrap();
	model.train(CORPUS.chars()).unwrap();
	model
}

#[test]
fn every_table_is_a_normalized_distribution() {
	for window_length in 1..=6 {
		let model = trained(&ModelConfig { window_length, seed: Some(1) });
		for (context, table) in model.contexts() {
			assert_eq!(context.chars().count(), window_length);
			assert!(!table.is_empty());

			let sum: f64 = table.iter().map(|o| o.probability()).sum();
			assert!((sum - 1.0).abs() < 1e-9, "{context:?}: probabilities sum to {sum}");

			let mut previous = 0.0;
			for observation in table.iter() {
				assert!(observation.cumulative_probability() >= previous);
				previous = observation.cumulative_probability();
			}
			assert!((previous - 1.0).abs() < 1e-9);
		}
	}
}

#[test]
fn counts_match_corpus_windows() {
	let model = trained(&ModelConfig { window_length: 3, seed: None });
	let chars: Vec<char> = CORPUS.chars().collect();
	let expected: u64 = chars
		.windows(4)
		.filter(|w| w[..3].iter().collect::<String>() == "th ")
		.count() as u64;

	let table = model.table("th ").unwrap();
	assert_eq!(table.total_count(), expected);
	assert_eq!(table.iter().map(|o| o.count()).sum::<u64>(), expected);
}

#[test]
fn seeded_models_are_reproducible() {
	let config = ModelConfig::builder().window_length(4).seed(20).build().unwrap();
	let mut first = trained(&config);
	let mut second = trained(&config);

	for _ in 0..5 {
		assert_eq!(first.generate("Whan", 120), second.generate("Whan", 120));
	}
}

#[test]
fn generated_text_only_uses_learned_transitions() {
	let mut model = trained(&ModelConfig { window_length: 3, seed: Some(99) });
	let text: Vec<char> = model.generate("The", 300).chars().collect();

	for window in text.windows(4) {
		let context: String = window[..3].iter().collect();
		let table = model.table(&context).unwrap();
		assert!(table.index_of(window[3]).is_some(), "{context:?} never followed by {:?}", window[3]);
	}
}

#[test]
fn zero_target_and_short_seed_are_no_ops() {
	let mut model = trained(&ModelConfig { window_length: 5, seed: None });
	assert_eq!(model.generate("Whan that", 0), "Whan that");
	assert_eq!(model.generate("Whan", 40), "Whan");
}

#[test]
fn corpus_shorter_than_window_learns_nothing() {
	let mut model = LanguageModel::with_seed(5, 20).unwrap();
	model.train("ab".chars()).unwrap();
	assert_eq!(model.context_count(), 0);
	assert_eq!(model.generate("abcde", 10), "abcde");
}

#[test]
fn reader_and_iterator_training_agree() {
	let mut from_reader = LanguageModel::with_seed(3, 5).unwrap();
	from_reader.train_reader(Cursor::new(CORPUS.as_bytes())).unwrap();
	let mut from_chars = trained(&ModelConfig { window_length: 3, seed: Some(5) });

	assert_eq!(from_reader.context_count(), from_chars.context_count());
	assert_eq!(from_reader.generate("And", 80), from_chars.generate("And", 80));
}

#[test]
fn invalid_window_is_a_config_error() {
	let err = LanguageModel::from_config(&ModelConfig { window_length: 0, seed: None }).unwrap_err();
	assert!(matches!(err, CharLmError::InvalidConfig(_)));
}

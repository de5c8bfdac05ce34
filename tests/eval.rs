use entity_typing::eval::{
    get_eval_string, get_gold_pred_str, get_mask_str, get_output_index, gold_from_tensor,
    strict_accuracy, EvalMetric, GoldPredPair, MetricSummary,
};
use entity_typing::typing::{OutputType, TypingVocab};
use entity_typing::{Config, TypingError};
use std::io::Write;
use tch::Tensor;

struct FixedMetric {
    micro: MetricSummary,
    macro_avg: MetricSummary,
}

impl EvalMetric for FixedMetric {
    fn micro(&self, _true_prediction: &[GoldPredPair]) -> MetricSummary {
        self.micro
    }

    fn macro_avg(&self, _true_prediction: &[GoldPredPair]) -> MetricSummary {
        self.macro_avg
    }
}

fn vocab() -> TypingVocab {
    TypingVocab::from_open_labels(
        ["person", "location", "organization", "artist", "city"]
            .iter()
            .map(|label| label.to_string())
            .collect(),
        4,
        2,
    )
    .unwrap()
}

fn pair(gold: &[&str], pred: &[&str]) -> GoldPredPair {
    (
        gold.iter().map(|label| label.to_string()).collect(),
        pred.iter().map(|label| label.to_string()).collect(),
    )
}

#[test]
fn output_index_per_example() -> anyhow::Result<()> {
    let outputs = Tensor::from_slice(&[0.2f32, 0.9, 0.4, 0.6, 0.7, 0.1, 0.3, 0.2]).view([2, 4]);

    let pred_idx = get_output_index(&outputs, 0.5)?;

    assert_eq!(pred_idx, vec![vec![1, 3], vec![0]]);
    for (row, pred) in pred_idx.iter().enumerate() {
        let arg_max = outputs.get(row as i64).argmax(0, false).int64_value(&[]);
        assert_eq!(pred[0], arg_max);
        assert_eq!(pred.iter().filter(|&&id| id == arg_max).count(), 1);
    }
    Ok(())
}

#[test]
fn output_index_requires_a_matrix() {
    let outputs = Tensor::from_slice(&[0.2f32, 0.9]);
    assert!(matches!(
        get_output_index(&outputs, 0.5),
        Err(TypingError::ValueError(_))
    ));
}

#[test]
fn gold_and_predictions_to_strings() -> anyhow::Result<()> {
    let vocab = vocab();
    let gold = gold_from_tensor(&Tensor::from_slice(&[1i64, 0, 0, 1, 0, 1, 0, 0]).view([2, 4]))?;
    let pred_idx = vec![vec![3, 0], vec![2]];

    let pairs = get_gold_pred_str(&pred_idx, &gold, OutputType::Wiki, &vocab)?;

    assert_eq!(
        pairs,
        vec![
            pair(&["person", "artist"], &["artist", "person"]),
            pair(&["location"], &["organization"]),
        ]
    );
    Ok(())
}

#[test]
fn out_of_vocabulary_index_is_an_error() {
    let vocab = vocab();
    let result = get_mask_str(&[vec![0, 3]], OutputType::Kb, &vocab);
    assert!(matches!(result, Err(TypingError::ValueError(_))));

    let result = get_gold_pred_str(&[vec![0]], &[], OutputType::Kb, &vocab);
    assert!(matches!(result, Err(TypingError::ValueError(_))));
}

#[test]
fn mask_indices_to_strings() -> anyhow::Result<()> {
    let vocab = vocab();
    let mask_strs = get_mask_str(&[vec![4, 1], vec![]], OutputType::Open, &vocab)?;
    assert_eq!(
        mask_strs,
        vec![vec!["city".to_string(), "location".to_string()], vec![]]
    );
    Ok(())
}

#[test]
fn eval_string_format() {
    let metric = FixedMetric {
        micro: MetricSummary {
            count: 2,
            pred_count: 2,
            avg_pred_count: 1.5,
            precision: 0.75,
            recall: 0.5,
            f1: 0.6,
        },
        macro_avg: MetricSummary {
            count: 2,
            pred_count: 2,
            avg_pred_count: 1.5,
            precision: 0.8,
            recall: 0.25,
            f1: 0.380952,
        },
    };
    let pairs = vec![
        pair(&["person"], &["person"]),
        pair(&["location", "city"], &["location"]),
    ];

    let output = get_eval_string(&pairs, &metric);

    assert_eq!(
        output,
        "Eval: 2 2 1.500 P:0.750 R:0.500 F1:0.600 Ma_P:0.800 Ma_R:0.250 Ma_F1:0.381\t Dev accuracy: 50.0%"
    );
}

#[test]
fn strict_accuracy_bounds() {
    let all_match = vec![
        pair(&["person", "artist"], &["artist", "person"]),
        pair(&["city"], &["city"]),
    ];
    let none_match = vec![
        pair(&["person"], &["location"]),
        pair(&["city"], &["city", "location"]),
    ];
    assert_eq!(strict_accuracy(&all_match), 1.0);
    assert_eq!(strict_accuracy(&none_match), 0.0);
}

#[test]
fn vocabulary_from_json_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{"open": ["person", "location", "artist"], "wiki": ["person", "location"], "kb": ["person"]}}"#
    )?;

    let vocab = TypingVocab::from_file(file.path())?;

    assert_eq!(vocab.label_counts().wiki, 2);
    assert_eq!(vocab.id_to_label(OutputType::Open, 2)?, "artist");
    Ok(())
}

#[test]
fn inconsistent_vocabulary_file_is_rejected() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{"open": ["person", "location"], "wiki": ["location"], "kb": ["person"]}}"#
    )?;

    assert!(matches!(
        TypingVocab::from_file(file.path()),
        Err(TypingError::SerializationError(_))
    ));
    Ok(())
}

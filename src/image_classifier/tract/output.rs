use crate::image_classifier::interface::Classification;

/// Turns raw model scores into the top `top_k` labelled classifications.
///
/// When the model has one more output than there are labels, the first
/// output is the background class and is dropped. The remaining scores are
/// passed through softmax unless they already form a probability
/// distribution.
pub fn rank_scores(scores: &[f32], labels: &[String], top_k: usize) -> Vec<Classification> {
    let scores = if scores.len() == labels.len() + 1 {
        &scores[1..]
    } else {
        scores
    };

    let probabilities = if is_distribution(scores) {
        scores.to_vec()
    } else {
        softmax(scores)
    };

    let mut ranked: Vec<(usize, f32)> = probabilities.into_iter().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .into_iter()
        .filter_map(|(index, confidence)| {
            labels.get(index).map(|label| Classification {
                label: label.clone(),
                confidence,
            })
        })
        .take(top_k)
        .collect()
}

fn is_distribution(scores: &[f32]) -> bool {
    let sum: f32 = scores.iter().sum();
    scores.iter().all(|s| (0.0..=1.0).contains(s)) && (sum - 1.0).abs() < 1e-3
}

fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

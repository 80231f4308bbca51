// Multinomial logistic regression over sparse rows
//
// Softmax model with intercept, L2 penalty on weights only, fitted by
// full-batch gradient descent. Parameters are frozen after `fit`.

use ndarray::{Array1, Array2};
use std::collections::BTreeSet;

use super::tfidf::SparseVector;
use crate::config::TrainingParams;
use crate::errors::TrainError;

#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// Sorted distinct labels; column `k` of `weights` belongs to `classes[k]`
    classes: Vec<String>,
    /// (n_features, n_classes)
    weights: Array2<f64>,
    /// (n_classes)
    intercepts: Array1<f64>,
    /// Iterations actually run during fitting
    iterations: usize,
}

impl LogisticRegression {
    /// Fit on `rows` with one label per row
    pub fn fit<S: AsRef<str>>(
        rows: &[SparseVector],
        labels: &[S],
        n_features: usize,
        params: &TrainingParams,
    ) -> Result<Self, TrainError> {
        if rows.is_empty() {
            return Err(TrainError::NoDocuments);
        }
        if rows.len() != labels.len() {
            return Err(TrainError::LengthMismatch {
                documents: rows.len(),
                labels: labels.len(),
            });
        }

        let classes: Vec<String> = labels
            .iter()
            .map(|l| l.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if classes.len() < 2 {
            return Err(TrainError::TooFewClasses(classes.len()));
        }

        let targets: Vec<usize> = labels
            .iter()
            .map(|l| {
                classes
                    .binary_search_by(|c| c.as_str().cmp(l.as_ref()))
                    .unwrap_or_default()
            })
            .collect();

        let n_classes = classes.len();
        let n = rows.len() as f64;
        // Mean loss, so the per-sample penalty is scaled by 1/n
        let alpha = 1.0 / (params.c * n);

        let mut model = Self {
            classes,
            weights: Array2::zeros((n_features, n_classes)),
            intercepts: Array1::zeros(n_classes),
            iterations: 0,
        };

        let mut grad_w = Array2::<f64>::zeros((n_features, n_classes));
        let mut grad_b = Array1::<f64>::zeros(n_classes);

        for iter in 0..params.max_iter {
            grad_w.assign(&model.weights);
            grad_w *= alpha;
            grad_b.fill(0.0);

            for (row, &target) in rows.iter().zip(&targets) {
                let mut residual = model.probabilities(row);
                residual[target] -= 1.0;
                residual /= n;

                for &(j, value) in &row.entries {
                    grad_w.row_mut(j).scaled_add(value, &residual);
                }
                grad_b += &residual;
            }

            let grad_norm = (grad_w.iter().map(|g| g * g).sum::<f64>()
                + grad_b.iter().map(|g| g * g).sum::<f64>())
            .sqrt();

            model.weights.scaled_add(-params.learning_rate, &grad_w);
            model.intercepts.scaled_add(-params.learning_rate, &grad_b);
            model.iterations = iter + 1;

            if grad_norm < params.tol {
                break;
            }
        }

        Ok(model)
    }

    /// Labels the model can produce, sorted
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Raw class scores for one row
    pub fn decision_function(&self, row: &SparseVector) -> Array1<f64> {
        let mut scores = self.intercepts.clone();
        for &(j, value) in &row.entries {
            if j < self.weights.nrows() {
                scores.scaled_add(value, &self.weights.row(j));
            }
        }
        scores
    }

    /// Softmax probabilities for one row
    pub fn probabilities(&self, row: &SparseVector) -> Array1<f64> {
        let mut scores = self.decision_function(row);
        let max = scores.fold(f64::NEG_INFINITY, |m, &s| m.max(s));
        scores.mapv_inplace(|s| (s - max).exp());
        let total = scores.sum();
        scores /= total;
        scores
    }

    /// Most likely label. The first (lowest sorted) class wins ties.
    pub fn predict(&self, row: &SparseVector) -> &str {
        let scores = self.decision_function(row);
        let mut best = 0;
        for (k, &score) in scores.iter().enumerate() {
            if score > scores[best] {
                best = k;
            }
        }
        &self.classes[best]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tfidf::TfIdfVectorizer;

    fn train(docs: &[&str], labels: &[&str]) -> (TfIdfVectorizer, LogisticRegression) {
        let vectorizer = TfIdfVectorizer::fit(docs).unwrap();
        let rows = vectorizer.transform_all(docs);
        let model = LogisticRegression::fit(
            &rows,
            labels,
            vectorizer.vocabulary_size(),
            &TrainingParams::default(),
        )
        .unwrap();
        (vectorizer, model)
    }

    #[test]
    fn test_separable_classes() {
        let docs = [
            "i am so happy today",
            "this is great fun",
            "feeling wonderful and happy",
            "i am sad and lonely",
            "this is terrible and sad",
            "feeling miserable today",
        ];
        let labels = ["happy", "happy", "happy", "sad", "sad", "sad"];
        let (vectorizer, model) = train(&docs, &labels);

        assert_eq!(model.classes(), &["happy".to_string(), "sad".to_string()]);
        assert_eq!(model.predict(&vectorizer.transform("so happy and wonderful")), "happy");
        assert_eq!(model.predict(&vectorizer.transform("lonely and miserable")), "sad");
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (vectorizer, model) = train(
            &["good morning", "good night", "hello there"],
            &["morning", "night", "greeting"],
        );
        let p = model.probabilities(&vectorizer.transform("good morning"));
        assert_eq!(p.len(), 3);
        assert!((p.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_row_predicts_a_known_class() {
        let (vectorizer, model) = train(&["yes please", "no thanks"], &["yes", "no"]);
        let label = model.predict(&vectorizer.transform("???"));
        assert!(model.classes().iter().any(|c| c == label));
    }

    #[test]
    fn test_single_class_is_rejected() {
        let rows = vec![SparseVector { entries: vec![(0, 1.0)] }];
        let err = LogisticRegression::fit(&rows, &["only"], 1, &TrainingParams::default())
            .unwrap_err();
        assert_eq!(err, TrainError::TooFewClasses(1));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let rows = vec![SparseVector::default(), SparseVector::default()];
        let err =
            LogisticRegression::fit(&rows, &["a"], 1, &TrainingParams::default()).unwrap_err();
        assert!(matches!(err, TrainError::LengthMismatch { documents: 2, labels: 1 }));
    }

    #[test]
    fn test_stops_early_at_tolerance() {
        let params = TrainingParams {
            tol: 10.0,
            ..TrainingParams::default()
        };
        let rows = vec![
            SparseVector { entries: vec![(0, 1.0)] },
            SparseVector { entries: vec![(1, 1.0)] },
        ];
        let model = LogisticRegression::fit(&rows, &["a", "b"], 2, &params).unwrap();
        assert_eq!(model.iterations(), 1);
    }
}

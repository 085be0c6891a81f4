//! Trainer and model capabilities, and evaluation against a test split.
//!
//! The statistical model itself lives outside this crate. [`Trainer`]
//! consumes training examples and produces a [`NerModel`]; the model's
//! [`NerModel::infer`] output has the same shape the serving layer returns
//! from its forward endpoint.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::NerPrepError;
use crate::ir::{Document, EntitySpan, TrainingExample};
use crate::tagging::bilou_tags;
use crate::tokenize::Tokenizer;

/// An entity predicted by a model, with character offsets into the input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedEntity {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
}

impl PredictedEntity {
    pub fn to_span(&self) -> EntitySpan {
        EntitySpan::new(self.start, self.end, self.label.clone())
    }
}

/// A trained NER model.
pub trait NerModel {
    /// Predicts entities in `text`, ordered by start offset.
    fn infer(&self, text: &str) -> Vec<PredictedEntity>;
}

/// Something that can train a [`NerModel`] from examples.
pub trait Trainer {
    type Model: NerModel;

    fn train(&self, examples: &[TrainingExample]) -> Result<Self::Model, NerPrepError>;
}

/// Every label used by at least one entity, sorted.
///
/// This is the label inventory a trainer has to register before training.
pub fn entity_labels(examples: &[TrainingExample]) -> BTreeSet<String> {
    examples
        .iter()
        .flat_map(|ex| ex.entities.iter().map(|e| e.label.clone()))
        .collect()
}

/// Token-level agreement between gold and predicted BILOU tags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub examples: usize,
    pub tokens: usize,
    pub correct: usize,
}

impl Evaluation {
    /// Fraction of tokens whose predicted tag matches the gold tag.
    ///
    /// Zero when there were no tokens to compare.
    pub fn accuracy(&self) -> f64 {
        if self.tokens == 0 {
            return 0.0;
        }
        self.correct as f64 / self.tokens as f64
    }
}

/// Evaluates `model` on `test` examples at token level.
///
/// Each example's text is tokenized once; gold tags come from its entities
/// and predicted tags from the model's spans on the same tokens, so both
/// sequences always have the same length.
pub fn evaluate<M, T>(model: &M, tokenizer: &T, test: &[TrainingExample]) -> Evaluation
where
    M: NerModel + ?Sized,
    T: Tokenizer + ?Sized,
{
    let mut evaluation = Evaluation::default();

    for example in test {
        let doc = Document::prepare(&example.text, tokenizer);
        let gold = bilou_tags(doc.tokens(), &example.entities);

        let predicted_spans: Vec<EntitySpan> = model
            .infer(doc.text())
            .iter()
            .map(PredictedEntity::to_span)
            .collect();
        let predicted = bilou_tags(doc.tokens(), &predicted_spans);

        evaluation.examples += 1;
        evaluation.tokens += gold.len();
        evaluation.correct += gold
            .iter()
            .zip(&predicted)
            .filter(|(g, p)| g == p)
            .count();
    }

    tracing::info!(
        examples = evaluation.examples,
        tokens = evaluation.tokens,
        accuracy = evaluation.accuracy(),
        "evaluation finished"
    );

    evaluation
}

/// Trains on `train` and evaluates the resulting model on `test`.
pub fn train_and_evaluate<R, T>(
    trainer: &R,
    tokenizer: &T,
    train: &[TrainingExample],
    test: &[TrainingExample],
) -> Result<(R::Model, Evaluation), NerPrepError>
where
    R: Trainer + ?Sized,
    T: Tokenizer + ?Sized,
{
    let model = trainer.train(train)?;
    let evaluation = evaluate(&model, tokenizer, test);
    Ok((model, evaluation))
}

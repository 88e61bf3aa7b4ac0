//! Model loading and inference on top of tract. The loaded plan is
//! read-only and shared across requests; the `Classifier` trait is the
//! seam that lets tests substitute a fake model for the real one.

use crate::error::{classify_load_error, BootstrapError};
use crate::labels::LABELS;
use anyhow::{anyhow, Result};
use image::imageops::FilterType;
use image::DynamicImage;
use std::cmp::Ordering;
use std::path::Path;
use tract_onnx::prelude::*;

/// Input geometry the artifact was exported with.
const INPUT_SIDE: usize = 224;

const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

type RunnablePlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Single capability exposed by the loaded model.
pub trait Classifier: Send + Sync + 'static {
    fn predict(&self, image: &DynamicImage) -> Result<String>;
}

#[derive(Debug)]
pub struct ScanModel {
    plan: RunnablePlan,
}

impl ScanModel {
    /// Deserialize the cached artifact. Invoked once, at bootstrap; a
    /// failure here is fatal to startup.
    pub fn load(path: &Path) -> Result<Self, BootstrapError> {
        let plan = build_plan(path).map_err(classify_load_error)?;
        Ok(Self { plan })
    }
}

fn build_plan(path: &Path) -> TractResult<RunnablePlan> {
    let plan = tract_onnx::onnx()
        .model_for_path(path)?
        .with_input_fact(0, f32::fact([1, 3, INPUT_SIDE, INPUT_SIDE]).into())?
        .into_optimized()?
        .into_runnable()?;
    // warmup run; also surfaces execution-time incompatibilities at load
    let zeros = Tensor::zero::<f32>(&[1, 3, INPUT_SIDE, INPUT_SIDE])?;
    plan.run(tvec!(zeros.into()))?;
    Ok(plan)
}

impl Classifier for ScanModel {
    fn predict(&self, image: &DynamicImage) -> Result<String> {
        let input = preprocess(image)?;
        let outputs = self.plan.run(tvec!(input.into()))?;
        let scores: Vec<f32> = outputs[0].to_array_view::<f32>()?.iter().copied().collect();
        top_label(&scores)
    }
}

/// Resize to the export geometry and normalize into an NCHW tensor.
fn preprocess(image: &DynamicImage) -> TractResult<Tensor> {
    let rgb = image
        .resize_exact(INPUT_SIDE as u32, INPUT_SIDE as u32, FilterType::Triangle)
        .to_rgb8();
    let mut data = vec![0f32; 3 * INPUT_SIDE * INPUT_SIDE];
    for (x, y, px) in rgb.enumerate_pixels() {
        for c in 0..3 {
            let v = px[c] as f32 / 255.0;
            data[c * INPUT_SIDE * INPUT_SIDE + y as usize * INPUT_SIDE + x as usize] =
                (v - IMAGENET_MEAN[c]) / IMAGENET_STD[c];
        }
    }
    Tensor::from_shape(&[1, 3, INPUT_SIDE, INPUT_SIDE], &data)
}

/// Map the highest-scoring class to its label. An index outside the
/// table is an inference error, never a fabricated label.
fn top_label(scores: &[f32]) -> Result<String> {
    let (idx, _) = scores
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(Ordering::Equal))
        .ok_or_else(|| anyhow!("model returned an empty score vector"))?;
    LABELS
        .get(idx)
        .map(|label| (*label).to_string())
        .ok_or_else(|| anyhow!("class index {idx} is outside the {}-entry label table", LABELS.len()))
}

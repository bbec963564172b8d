use crate::result::ClassifierError;

/// A single unit of inference over a fitted model.
///
/// Inputs are plain snapshots supplied by the caller; this crate never reads storage.
pub trait AiJob {
    type Input;
    type Output;

    /// The input the job will run inference on.
    fn input(&self) -> &Self::Input;

    /// Execute inference. Must not mutate any tracked state.
    fn run(&self) -> Result<Self::Output, ClassifierError>;
}

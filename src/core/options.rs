//! Run-wide options resolved from the command line.

use crate::core::outcome::Stage;

/// Options controlling a batch build. Resolved once, never mutated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Delete build directories before configuring
    pub clean: bool,

    /// Also build for WebAssembly
    pub web: bool,

    /// Build for WebAssembly only
    pub web_only: bool,

    /// Build only the AllFeaturesExample test project
    pub test_only: bool,

    /// Stream build tool output instead of capturing it
    pub verbose: bool,
}

impl RunOptions {
    /// Create options, applying `web_only ⇒ web`.
    pub fn new(clean: bool, web: bool, web_only: bool, test_only: bool, verbose: bool) -> Self {
        RunOptions {
            clean,
            web: web || web_only,
            web_only,
            test_only,
            verbose,
        }
    }

    /// Whether native stages run.
    pub fn builds_native(&self) -> bool {
        !self.web_only
    }

    /// Whether web stages run.
    pub fn builds_web(&self) -> bool {
        self.web || self.web_only
    }

    /// The stages each example goes through, in order.
    pub fn stages(&self) -> Vec<Stage> {
        let mut stages = vec![Stage::Update];
        if self.builds_native() {
            stages.extend([Stage::NativeConfigure, Stage::NativeBuild]);
        }
        if self.builds_web() {
            stages.extend([Stage::WebConfigure, Stage::WebBuild]);
        }
        stages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_native_only() {
        let opts = RunOptions::default();
        assert_eq!(
            opts.stages(),
            vec![Stage::Update, Stage::NativeConfigure, Stage::NativeBuild]
        );
    }

    #[test]
    fn test_web_adds_web_stages() {
        let opts = RunOptions::new(false, true, false, false, false);
        assert_eq!(opts.stages().len(), 5);
        assert_eq!(opts.stages().last(), Some(&Stage::WebBuild));
    }

    #[test]
    fn test_web_only_implies_web_and_skips_native() {
        let opts = RunOptions::new(false, false, true, false, false);
        assert!(opts.web);
        assert!(opts.builds_web());
        assert!(!opts.builds_native());
        assert_eq!(
            opts.stages(),
            vec![Stage::Update, Stage::WebConfigure, Stage::WebBuild]
        );
    }
}

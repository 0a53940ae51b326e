//! Implementation of the batch build.
//!
//! Each example runs through the stages selected by [`RunOptions::stages`]
//! one at a time. The first failing stage ends that example and is recorded
//! in the [`BuildTally`]; the next example is unaffected.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::builder::cmake::Toolset;
use crate::builder::project_generator::{self, update_command};
use crate::core::example::{select_examples, Example};
use crate::core::options::RunOptions;
use crate::core::outcome::{BuildOutcome, BuildTally, Stage};
use crate::core::platform::{PlatformProfile, WEB_BUILD_DIR};
use crate::ops::events::BuildEvent;
use crate::util::config::Config;
use crate::util::context::GlobalContext;
use crate::util::fs::remove_dir_all_if_exists;
use crate::util::process::{CommandRunner, ProcessBuilder, SystemRunner};
use crate::util::shell::{Shell, Status};

/// Everything needed to build examples, fixed for the whole run.
#[derive(Debug, Clone)]
pub struct BuildSession {
    /// Repository root
    pub root: PathBuf,

    /// Host platform profile
    pub profile: PlatformProfile,

    /// projectGenerator executable
    pub generator: PathBuf,

    /// cmake / emcmake / job settings
    pub tools: Toolset,

    /// Run options
    pub opts: RunOptions,
}

impl BuildSession {
    /// Build every example in order and return the tally.
    pub fn build_examples(
        &self,
        examples: &[Example],
        runner: &mut dyn CommandRunner,
        shell: &Arc<Shell>,
    ) -> BuildTally {
        let total = examples.len();
        let mut tally = BuildTally::new();
        let progress = shell.progress(total as u64, "Building");

        for (i, example) in examples.iter().enumerate() {
            shell.status(
                Status::Building,
                format!("[{}/{}] Updating & Building: {}", i + 1, total, example.name),
            );
            progress.set_message(&example.name);

            let outcome = self.build_example(example, runner, shell);
            if outcome.is_success() {
                shell.status(Status::Finished, &example.name);
            }
            BuildEvent::example_finished(&example.name, outcome).emit(shell);
            tally.record(&example.name, outcome);

            progress.inc(1);
        }

        progress.finish();
        tally
    }

    /// Run the stage pipeline for one example.
    pub fn build_example(
        &self,
        example: &Example,
        runner: &mut dyn CommandRunner,
        shell: &Shell,
    ) -> BuildOutcome {
        for stage in self.opts.stages() {
            if let Err(e) = self.prepare_stage(stage, &example.path, shell) {
                shell.status(Status::Failed, stage.failure_message());
                shell.error(format!("{:#}", e));
                return BuildOutcome::Failed { stage };
            }

            let cmd = self.stage_command(stage, &example.path);
            tracing::debug!("{} {}: {}", example.name, stage, cmd);
            if shell.is_verbose() {
                let status = match stage {
                    Stage::Update => Status::Updating,
                    _ => Status::Building,
                };
                shell.status(status, &cmd);
            }

            let outcome = runner.run(&cmd);
            if !outcome.is_success() {
                shell.status(Status::Failed, stage.failure_message());
                BuildEvent::stage_failed(&example.name, stage, outcome.diagnostic()).emit(shell);
                if let Some(text) = outcome.diagnostic() {
                    shell.dump(text);
                }
                return BuildOutcome::Failed { stage };
            }
        }

        BuildOutcome::Success
    }

    /// Remove stale build output before a configure stage in clean mode.
    fn prepare_stage(&self, stage: Stage, example_dir: &Path, shell: &Shell) -> Result<()> {
        if !self.opts.clean {
            return Ok(());
        }
        let build_dir = match stage {
            Stage::NativeConfigure => example_dir.join(self.profile.build_dir),
            Stage::WebConfigure => example_dir.join(WEB_BUILD_DIR),
            _ => return Ok(()),
        };
        if remove_dir_all_if_exists(&build_dir)? && shell.is_verbose() {
            shell.status(Status::Removed, build_dir.display());
        }
        Ok(())
    }

    /// The command line for a stage of one example.
    pub fn stage_command(&self, stage: Stage, example_dir: &Path) -> ProcessBuilder {
        match stage {
            Stage::Update => {
                update_command(&self.generator, example_dir, &self.root, self.opts.web)
            }
            Stage::NativeConfigure => {
                self.tools.configure_native(example_dir, self.profile.build_dir)
            }
            Stage::NativeBuild => self.tools.build_native(example_dir, self.profile.build_dir),
            Stage::WebConfigure => self.tools.configure_web(example_dir),
            Stage::WebBuild => self.tools.build_web(example_dir),
        }
    }
}

/// Remove the framework's shared build directories under `trussc/`.
pub fn clean_shared_builds(
    trussc_dir: &Path,
    profile: &PlatformProfile,
    opts: &RunOptions,
    shell: &Shell,
) -> Result<()> {
    shell.status(Status::Cleaning, "TrussC shared build");

    let mut targets = Vec::new();
    if opts.builds_native() {
        targets.push(trussc_dir.join(profile.build_dir));
    }
    if opts.builds_web() {
        targets.push(trussc_dir.join(WEB_BUILD_DIR));
    }

    for dir in targets {
        if remove_dir_all_if_exists(&dir)? {
            shell.status(Status::Removed, dir.display());
        }
    }
    Ok(())
}

/// Locate tools, select examples and build them all with real processes.
pub fn build_all(
    ctx: &GlobalContext,
    config: &Config,
    opts: RunOptions,
    shell: &Arc<Shell>,
) -> Result<BuildTally> {
    let mut runner = SystemRunner::new(opts.verbose);
    build_all_with(ctx, config, opts, shell, &mut runner)
}

/// [`build_all`] with an explicit command runner.
pub fn build_all_with(
    ctx: &GlobalContext,
    config: &Config,
    opts: RunOptions,
    shell: &Arc<Shell>,
    runner: &mut dyn CommandRunner,
) -> Result<BuildTally> {
    let root = ctx.root();
    let profile = PlatformProfile::host();

    let generator =
        project_generator::locate(root, &profile, config.tools.project_generator.as_deref())?;
    shell.status(
        Status::Found,
        format!("ProjectGenerator at: {}", generator.display()),
    );

    shell.note("=== TrussC Examples Batch Build ===");
    shell.note(format!("Platform: {}", profile.os));
    shell.note(format!("ProjectGenerator: {}", generator.display()));
    if opts.web_only {
        shell.note("Mode: Web Only");
    }
    if opts.test_only {
        shell.note("Mode: AllFeaturesExample Only");
    }

    let examples = select_examples(root, opts.test_only)?;
    shell.note(format!("Found {} examples", examples.len()));
    tracing::info!("building {} example(s) from {}", examples.len(), root.display());

    BuildEvent::BuildStarted {
        platform: profile.os.as_str(),
        project_generator: generator.display().to_string(),
        examples: examples.iter().map(|e| e.name.as_str()).collect(),
    }
    .emit(shell);

    if opts.clean {
        clean_shared_builds(&ctx.trussc_dir(), &profile, &opts, shell)?;
    }

    let session = BuildSession {
        root: root.to_path_buf(),
        tools: Toolset::resolve(config, &profile),
        profile,
        generator,
        opts,
    };
    tracing::debug!("toolset: {:?}", session.tools);

    Ok(session.build_examples(&examples, runner, shell))
}

/// The examples a build would process, without locating or running tools.
pub fn list_examples(ctx: &GlobalContext, test_only: bool) -> Result<Vec<Example>> {
    Ok(select_examples(ctx.root(), test_only)?)
}

//! Given steps for overdue sweep BDD scenarios.

use super::world::{SweepWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::project::services::CreateProjectRequest;

#[given(r#"a project "{name}" described as "{description}""#)]
fn project_exists(
    world: &mut SweepWorld,
    name: String,
    description: String,
) -> Result<(), eyre::Report> {
    let project = run_async(
        world
            .projects
            .create(CreateProjectRequest::new(name, description)),
    )
    .wrap_err("create project for sweep scenario")?;
    world.project = Some(project);
    Ok(())
}

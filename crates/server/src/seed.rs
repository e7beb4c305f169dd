//! First-run dataset. Gated on the section table being empty, so running it
//! again is a no-op.

use tracing::info;

use crate::api::AppState;
use crate::repository::{
    AssignmentRepository, CourseRepository, SectionRepository, StudentRepository,
    TeacherRepository,
};

pub async fn seed_if_empty(state: &AppState) -> anyhow::Result<()> {
    if state.sections.count().await? > 0 {
        return Ok(());
    }

    info!("empty store, inserting seed dataset");

    let a1 = state.sections.create("A1".to_string()).await?;
    let b2 = state.sections.create("B2".to_string()).await?;

    state.students.create("Maria".to_string(), a1.id).await?;
    state.students.create("Giannis".to_string(), a1.id).await?;
    state.students.create("Eleni".to_string(), b2.id).await?;

    let math = state.courses.create("Math".to_string()).await?;
    let literature = state.courses.create("Literature".to_string()).await?;
    state.courses.create("Physics".to_string()).await?;

    let papadopoulou = state
        .teachers
        .create("K. Papadopoulou".to_string())
        .await?;
    let dimitriou = state.teachers.create("N. Dimitriou".to_string()).await?;

    state
        .assignments
        .assign(a1.id, math.id, papadopoulou.id)
        .await?;
    state
        .assignments
        .assign(b2.id, literature.id, dimitriou.id)
        .await?;

    Ok(())
}

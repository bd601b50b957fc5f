//! UX agent (Jihane) - DESIGN phase.
//!
//! Owns user flows, wireframes, design systems, accessibility, and prototypes.

use super::{AgentRole, AgentSpec, TaskSpec, bullet_list};

pub fn spec() -> AgentSpec {
    AgentSpec {
        role: AgentRole::Ux,
        name: "Jihane",
        title: "UX Agent",
        goal: "Design user experience, create flows, and ensure accessibility",
        backstory: "Jihane is a UX designer with 10+ years of experience creating intuitive, \
                    accessible user interfaces. She specializes in user-centered design, \
                    design systems, and accessibility standards.",
    }
}

/// Task: design user flows from user stories.
pub fn user_flows_task(user_stories: &[String], personas: Option<&str>) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Design user flows for the following user stories:\n\n\
             User Stories:\n{}\n\n\
             Personas:\n{}\n\n\
             For each flow, provide:\n\
             1. Flow name and purpose\n\
             2. Step-by-step user journey\n\
             3. Decision points\n\
             4. Error states\n\
             5. Success states\n\
             6. Alternative paths\n\n\
             Use flowchart notation or clear step descriptions.",
            bullet_list(user_stories),
            personas.unwrap_or("To be defined")
        ),
        "Detailed user flows in markdown format",
    )
}

/// Task: design wireframes for a set of screens.
pub fn wireframes_task(user_flows: &str, screens: &[String]) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Design wireframes for the following screens, consistent with the user flows:\n\n\
             User Flows:\n{}\n\n\
             Screens:\n{}\n\n\
             For each screen, describe:\n\
             - Layout and information hierarchy\n\
             - Navigation elements\n\
             - Key interactive components\n\
             - Empty, loading, and error states\n\
             - Responsive behavior",
            user_flows,
            bullet_list(screens)
        ),
        "Wireframe specifications for all screens",
    )
}

/// Task: define a design system.
pub fn design_system_task(brand_guidelines: Option<&str>) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Create a design system for the project:\n\n\
             Brand Guidelines:\n{}\n\n\
             Include:\n\
             1. Color palette (primary, secondary, semantic colors)\n\
             2. Typography scale\n\
             3. Spacing system\n\
             4. Core components (buttons, inputs, cards, modals)\n\
             5. Interaction states (hover, focus, disabled)\n\
             6. Iconography guidelines",
            brand_guidelines.unwrap_or("none provided")
        ),
        "Comprehensive design system documentation",
    )
}

/// Task: audit a UI for accessibility.
pub fn accessibility_task(ui_description: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Perform an accessibility audit of the following UI:\n\n\
             {}\n\n\
             Evaluate against WCAG 2.1 AA:\n\
             - Color contrast\n\
             - Keyboard navigation\n\
             - Screen reader support (labels, roles, landmarks)\n\
             - Focus management\n\
             - Motion and animation concerns\n\n\
             For each issue, state the criterion violated and a concrete fix.",
            ui_description
        ),
        "Accessibility audit report with recommendations",
    )
}

/// Task: specify an interactive prototype.
pub fn prototype_task(wireframes: &str, interactions: &[String]) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Specify an interactive prototype based on these wireframes:\n\n\
             {}\n\n\
             Interactions to cover:\n{}\n\n\
             For each interaction, describe the trigger, transition, feedback, \
             and resulting state.",
            wireframes,
            bullet_list(interactions)
        ),
        "Interactive prototype specifications",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_flows_task_lists_stories() {
        let stories = vec!["As a user I want to log in".to_string()];
        let task = user_flows_task(&stories, None);
        assert!(task.description.contains("- As a user I want to log in"));
        assert!(task.description.contains("To be defined"));
    }

    #[test]
    fn test_accessibility_task_targets_wcag() {
        let task = accessibility_task("a login form");
        assert!(task.description.contains("WCAG 2.1 AA"));
        assert!(task.description.contains("a login form"));
    }
}

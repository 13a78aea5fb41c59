use std::time::Duration;

use crate::domain::SiteProfile;

/// Parallax speeds of the two hero visuals (back, front).
pub const HERO_PARALLAX_SPEEDS: [f64; 2] = [-0.5, 0.8];

/// Stagger between consecutive reveals in one group.
pub const REVEAL_STAGGER: Duration = Duration::from_millis(100);

pub fn stagger(index: usize) -> Duration {
    REVEAL_STAGGER * index as u32
}

#[derive(Debug, Clone, PartialEq)]
pub struct Competency {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const COMPETENCIES: [Competency; 4] = [
    Competency {
        id: "viz",
        title: "Data Visualization",
        description: "Creating intuitive dashboards and charts that communicate complex findings with clarity and impact.",
    },
    Competency {
        id: "db",
        title: "Database Management",
        description: "Proficient in SQL and NoSQL databases, ensuring efficient data retrieval and storage optimization.",
    },
    Competency {
        id: "stat",
        title: "Statistical Analysis",
        description: "Applying advanced statistical methods to uncover trends, correlations, and predictive patterns.",
    },
    Competency {
        id: "bi",
        title: "Business Intelligence",
        description: "Translating data insights into actionable business strategies that drive growth and efficiency.",
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct Pillar {
    pub title: &'static str,
    pub body: &'static str,
}

/// Static copy of the home page.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeContent {
    pub badge: String,
    pub headline: [&'static str; 2],
    pub tagline: &'static str,
    pub about_heading: &'static str,
    pub about_lead: &'static str,
    pub about_quote: &'static str,
    pub pillars: [Pillar; 2],
    pub competencies_heading: &'static str,
    pub competencies_lead: &'static str,
    pub featured_label: &'static str,
    pub featured_title: &'static str,
    pub cta_heading: &'static str,
    pub cta_body: &'static str,
}

impl HomeContent {
    pub fn for_profile(profile: &SiteProfile) -> Self {
        Self {
            badge: format!("{} • {}", profile.owner_name, profile.role),
            headline: ["Crafting", "Insight"],
            tagline: "Transforming complex datasets into clear, strategic narratives that drive business intelligence.",
            about_heading: "The Art of Analysis",
            about_lead: "Bridging the gap between raw numbers and strategic decisions.",
            about_quote: "\"I am a dedicated Data Analyst with expertise in extracting meaningful patterns from complex datasets. My approach combines statistical rigor with creative problem-solving.\"",
            pillars: [
                Pillar {
                    title: "Strategic Vision",
                    body: "With a strong foundation in data visualization and business intelligence, I transform raw information into compelling narratives that empower organizations to make informed choices.",
                },
                Pillar {
                    title: "Technical Precision",
                    body: "Leveraging advanced statistical modeling and database management to ensure accuracy, reliability, and depth in every analysis delivered.",
                },
            ],
            competencies_heading: "Core Competencies",
            competencies_lead: "A comprehensive toolkit designed to solve complex data challenges.",
            featured_label: "Featured Case Study",
            featured_title: "Retail Market Analysis 2025",
            cta_heading: "Ready to Collaborate?",
            cta_body: "Let's discuss how data-driven insights can elevate your next project and drive measurable results.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger_steps_by_hundred_ms() {
        assert_eq!(stagger(0), Duration::ZERO);
        assert_eq!(stagger(3), Duration::from_millis(300));
    }

    #[test]
    fn test_badge_uses_profile() {
        let content = HomeContent::for_profile(&SiteProfile::default());
        assert_eq!(content.badge, "Dhanuja • Data Analyst");
        assert_eq!(COMPETENCIES.len(), 4);
    }
}

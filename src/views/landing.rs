use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCard {
    pub title: &'static str,
    pub description: &'static str,
    pub icon_ref: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LandingView {
    pub brand: &'static str,
    pub partner: &'static str,
    pub badge: &'static str,
    pub headline: &'static str,
    pub tagline: &'static str,
    pub call_to_action: &'static str,
    pub features: [FeatureCard; 4],
}

impl Default for LandingView {
    fn default() -> Self {
        Self {
            brand: "AthleteX",
            partner: "Sports Authority of India",
            badge: "AI-Powered Assessment Platform",
            headline: "Discover Your Athletic Potential",
            tagline: "Join India's revolutionary sports talent assessment platform. Record your \
                      fitness tests, get AI-powered analysis, and unlock opportunities with the \
                      Sports Authority of India.",
            call_to_action: "Start Assessment",
            features: [
                FeatureCard {
                    title: "Video Assessment",
                    description: "Record your fitness tests with AI-powered analysis",
                    icon_ref: "video",
                },
                FeatureCard {
                    title: "Instant Results",
                    description: "Get immediate feedback on your performance",
                    icon_ref: "zap",
                },
                FeatureCard {
                    title: "Performance Tracking",
                    description: "Monitor progress and compare with benchmarks",
                    icon_ref: "bar-chart",
                },
                FeatureCard {
                    title: "Fair Assessment",
                    description: "AI-powered cheat detection ensures authenticity",
                    icon_ref: "shield",
                },
            ],
        }
    }
}

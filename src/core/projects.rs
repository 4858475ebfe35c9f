use crate::domain::model::Project;

pub static PROJECTS: &[Project] = &[
    Project {
        title: "Full Stack Developer Portfolio",
        stack: "Next.js · TypeScript · Tailwind CSS · MongoDB · Vercel",
        href: "https://github.com/Tanvir1610/Portfolio",
        description: "A complete developer portfolio with responsive design, dark/light mode, MongoDB contact storage, and smooth animations. Deployed on Vercel with a custom domain.",
    },
    Project {
        title: "Nutrition Management System",
        stack: "HTML · CSS · JavaScript",
        href: "https://github.com/Tanvir1610/NutriTrack",
        description: "A responsive site for managing nutrition and health records with a calculator, animated home, and transitions. Built for students and healthcare use cases.",
    },
    Project {
        title: "GCET Connection",
        stack: "Next.js · TypeScript · Tailwind CSS · Supabase",
        href: "https://github.com/Tanvir1610/GCET-Connection",
        description: "A social network for GCET students and alumni with auth, friend requests, messaging, posts/reels, and stories. Instagram/Facebook-inspired UI.",
    },
    Project {
        title: "Tic-Tac-Toe (Player Names)",
        stack: "HTML · CSS · JavaScript",
        href: "https://github.com/Tanvir1610/Tic-Tac-Toe",
        description: "Enhanced Tic-Tac-Toe where players can enter names. Gradient background, animations for UI, and responsive layout.",
    },
    Project {
        title: "NeuroLm",
        stack: "HTML · CSS · JavaScript · Database",
        href: "https://github.com/Tanvir1610/NeuroLm",
        description: "Mini-project exploring AI for Brain Tumor prediction/management. Outcome-aligned with planning, execution, and reporting; future model integrations planned.",
    },
    Project {
        title: "Alpha Athlete",
        stack: "HTML · CSS · JavaScript · Payment Integration",
        href: "https://github.com/Tanvir1610/Alpha-Athlete",
        description: "Athletic-themed e-commerce landing with dynamic UX and interactivity, showing polished UI component design.",
    },
];

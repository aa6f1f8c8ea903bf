//! The analysis crew: three agent roles working through four tasks in
//! order. Each task sees the company and the output of every earlier task.

/// Persona an LLM call is made under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentRole {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
}

impl AgentRole {
    pub fn system_prompt(&self) -> String {
        format!(
            "You are the {}.\nGoal: {}\n\n{}",
            self.role, self.goal, self.backstory
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrewTask {
    pub name: &'static str,
    pub heading: &'static str,
    pub agent: &'static AgentRole,
    /// `{company}` is replaced with the company name.
    pub instructions: &'static str,
}

pub const RESEARCH_ANALYST: AgentRole = AgentRole {
    role: "Staff Research Analyst",
    goal: "Gather and interpret market news, sentiment and events that move the stock.",
    backstory: "You have spent years on a research desk separating signal from noise in \
                press releases, analyst notes and market chatter. You always cite what a \
                claim is based on.",
};

pub const FINANCIAL_ANALYST: AgentRole = AgentRole {
    role: "Senior Financial Analyst",
    goal: "Assess the company's financial health and the story its filings tell.",
    backstory: "You read balance sheets, income statements and regulatory filings for a \
                living and explain what the numbers mean for an investor in plain terms.",
};

pub const INVESTMENT_ADVISOR: AgentRole = AgentRole {
    role: "Private Investment Advisor",
    goal: "Turn the team's research into a clear, balanced investment recommendation.",
    backstory: "You advise private clients and are known for recommendations that weigh \
                upside against risk and state their assumptions openly.",
};

pub const TASKS: [CrewTask; 4] = [
    CrewTask {
        name: "research",
        heading: "Market research",
        agent: &RESEARCH_ANALYST,
        instructions: "Collect and summarize recent news, press releases and market \
                       analyses about {company} and its industry. Note upcoming events such \
                       as earnings dates and the overall market sentiment. Finish with a \
                       bullet list of the most important findings.",
    },
    CrewTask {
        name: "financial_analysis",
        heading: "Financial analysis",
        agent: &FINANCIAL_ANALYST,
        instructions: "Analyze the financial health of {company}: revenue and earnings \
                       trends, margins, P/E ratio, EPS growth, debt levels and cash flow. \
                       Compare it with its main industry peers where you can.",
    },
    CrewTask {
        name: "filings_analysis",
        heading: "Filings analysis",
        agent: &FINANCIAL_ANALYST,
        instructions: "Review the latest 10-Q and 10-K filings of {company}. Summarize the \
                       management discussion and analysis, the financial statements, \
                       insider trading activity and any disclosed risks. Highlight red flags \
                       and positive signals.",
    },
    CrewTask {
        name: "recommendation",
        heading: "Recommendation",
        agent: &INVESTMENT_ADVISOR,
        instructions: "Using the research and analyses above, write a complete investment \
                       recommendation for {company}: a clear stance (buy, hold or sell), the \
                       investment thesis, key risks, and the strategy you would suggest to \
                       a client.",
    },
];

impl CrewTask {
    /// User prompt for this task given the sections produced so far.
    pub fn user_prompt(&self, company: &str, previous: &[(&str, &str)]) -> String {
        let mut prompt = self.instructions.replace("{company}", company);
        if !previous.is_empty() {
            prompt.push_str("\n\nWork produced so far by the team:\n");
            for (heading, output) in previous {
                prompt.push_str(&format!("\n## {}\n{}\n", heading, output.trim()));
            }
        }
        prompt
    }
}

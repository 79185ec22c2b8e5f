//! The fixed track catalog: three project families, eight ideas each,
//! consumed in rotation by the daily cycle.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Track {
    /// Small HTTP service scaffolds (Node/Express).
    Service,
    /// Assistant skill scaffolds (manifest + stub).
    Skill,
    /// Solidity contract scaffolds (Hardhat project).
    Contract,
}

impl Track {
    /// Deterministic processing order for the daily cycle.
    pub const ALL: [Track; 3] = [Track::Service, Track::Skill, Track::Contract];

    pub fn name(&self) -> &'static str {
        match self {
            Track::Service => "Service",
            Track::Skill => "Skill",
            Track::Contract => "Contract",
        }
    }

    pub fn ideas(&self) -> &'static [Idea] {
        match self {
            Track::Service => SERVICE_IDEAS,
            Track::Skill => SKILL_IDEAS,
            Track::Contract => CONTRACT_IDEAS,
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Idea {
    pub title: &'static str,
    pub description: &'static str,
}

impl Idea {
    /// Lowercased, hyphen-separated form of the title, usable as a repo name
    /// stem and a package name.
    pub fn slug(&self) -> String {
        self.title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

const SERVICE_IDEAS: &[Idea] = &[
    Idea {
        title: "LedgerLite",
        description: "Minimal double-entry ledger API with webhook notifications",
    },
    Idea {
        title: "QuoteVault",
        description: "Price quote caching service with TTL expiry",
    },
    Idea {
        title: "PaywallLink",
        description: "Signed payment links with expiring access tokens",
    },
    Idea {
        title: "InvoiceRelay",
        description: "Invoice delivery service with retry queues",
    },
    Idea {
        title: "MeterPoint",
        description: "Usage metering endpoint for per-call billing",
    },
    Idea {
        title: "RefundDesk",
        description: "Refund request intake with an audit trail",
    },
    Idea {
        title: "TollGate",
        description: "API monetization gateway with quota enforcement",
    },
    Idea {
        title: "EscrowBridge",
        description: "Escrow status relay between payment providers",
    },
];

const SKILL_IDEAS: &[Idea] = &[
    Idea {
        title: "DigestBot",
        description: "Daily changelog digest summarizer",
    },
    Idea {
        title: "TriageMate",
        description: "Issue triage assistant that labels reports by severity",
    },
    Idea {
        title: "StandupScribe",
        description: "Turns meeting notes into standup summaries",
    },
    Idea {
        title: "ReleaseHerald",
        description: "Release note drafting assistant",
    },
    Idea {
        title: "CodeCartographer",
        description: "Explains repository structure to newcomers",
    },
    Idea {
        title: "DependencyScout",
        description: "Surveys dependencies for pending updates",
    },
    Idea {
        title: "IncidentEcho",
        description: "Reconstructs incident timelines from chat logs",
    },
    Idea {
        title: "OnboardGuide",
        description: "Answers onboarding questions about a codebase",
    },
];

const CONTRACT_IDEAS: &[Idea] = &[
    Idea {
        title: "MilestoneEscrow",
        description: "Escrow releasing funds on milestone approval",
    },
    Idea {
        title: "BountyBoard",
        description: "On-chain registry of open bounties with claims",
    },
    Idea {
        title: "SplitStream",
        description: "Payment splitter streaming shares to contributors",
    },
    Idea {
        title: "AccessPass",
        description: "Non-transferable membership token with expiry",
    },
    Idea {
        title: "PledgeLock",
        description: "Time-locked pledge vault for group purchases",
    },
    Idea {
        title: "RoyaltyRouter",
        description: "Royalty distribution router for creators",
    },
    Idea {
        title: "AttestLog",
        description: "Event emitter recording signed attestations",
    },
    Idea {
        title: "GrantGate",
        description: "Grant disbursement gate with quorum approval",
    },
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

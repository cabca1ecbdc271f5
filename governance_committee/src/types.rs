//! Data types for the governance committee

use soroban_sdk::{contracttype, Address, String};

/// Lifecycle state of a proposal. Every state except `Active` is terminal.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProposalOutcome {
    /// Still collecting votes
    Active,
    /// Reached a three-vote majority in favor
    Passed,
    /// Reached a three-vote majority against
    Failed,
    /// All four actors voted and split two against two
    Tied,
    /// Deadline passed without resolution
    Expired,
}

/// A committee proposal and its tally.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    /// Sequential id, starting at 1
    pub id: u64,
    /// Actor who created the proposal
    pub proposer: Address,
    /// Free-form description of the proposed action
    pub description: String,
    /// Votes in favor
    pub for_votes: u32,
    /// Votes against
    pub against_votes: u32,
    /// Ledger timestamp at creation
    pub created_at: u64,
    /// Last timestamp at which a vote is accepted
    pub voting_deadline: u64,
    /// Current lifecycle state
    pub outcome: ProposalOutcome,
    /// Ledger timestamp of the passing vote, if the proposal passed
    pub passed_at: Option<u64>,
}

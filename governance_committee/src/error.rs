use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CommitteeError {
    /// Contract has already been initialized
    AlreadyInitialized = 1,
    /// Contract has not been initialized yet
    NotInitialized = 2,
    /// Actor set is not exactly four pairwise-distinct addresses
    InvalidActorSet = 3,
    /// Caller is not a committee actor
    NotAnActor = 4,
    /// Actor holds no governance weight tokens
    NoGovernanceTokens = 5,
    /// Proposal description is empty
    EmptyDescription = 6,
    /// No proposal exists under this id
    InvalidProposalId = 7,
    /// Actor has already voted on this proposal
    AlreadyVoted = 8,
    /// Proposal has reached a terminal outcome
    ProposalTerminal = 9,
    /// Voting deadline has passed
    VotingPeriodEnded = 10,
    /// Voting deadline has not passed yet
    VotingPeriodNotEnded = 11,
    /// Voting period outside the allowed bounds
    VotingPeriodOutOfBounds = 12,
}

//! Transfer message builder.

use solana_compute_budget_interface::ComputeBudgetInstruction;
use solana_hash::Hash;
use solana_instruction::Instruction;
use solana_message::{CompileError, VersionedMessage, v0};
use solana_pubkey::Pubkey;
use solana_signer::{SignerError, signers::Signers};
use solana_system_interface::instruction as system_instruction;
use solana_transaction::versioned::VersionedTransaction;

/// Compiled, not-yet-signed transfer message.
#[derive(Debug, Clone)]
pub struct UnsignedTransfer {
    /// Versioned message ready to sign.
    message: VersionedMessage,
}

impl UnsignedTransfer {
    /// Returns the message payload.
    #[must_use]
    pub const fn message(&self) -> &VersionedMessage {
        &self.message
    }

    /// Signs the message with the provided signers.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError`] when signer validation or signing fails.
    pub fn sign<T>(self, signers: &T) -> Result<VersionedTransaction, SignerError>
    where
        T: Signers + ?Sized,
    {
        VersionedTransaction::try_new(self.message, signers)
    }
}

/// Builder for a single-sender SOL transfer message.
#[derive(Debug, Clone)]
pub struct TransferBuilder {
    /// Fee payer, transfer source, and sole signer.
    sender: Pubkey,
    /// Transfer destination.
    recipient: Pubkey,
    /// Transfer amount in lamports.
    lamports: u64,
    /// Optional priority fee (micro-lamports per compute unit).
    priority_fee_micro_lamports: Option<u64>,
    /// Optional compute unit limit.
    compute_unit_limit: Option<u32>,
}

impl TransferBuilder {
    /// Creates a transfer builder.
    #[must_use]
    pub const fn new(sender: Pubkey, recipient: Pubkey, lamports: u64) -> Self {
        Self {
            sender,
            recipient,
            lamports,
            priority_fee_micro_lamports: None,
            compute_unit_limit: None,
        }
    }

    /// Sets the priority fee in micro-lamports per compute unit.
    #[must_use]
    pub const fn with_priority_fee_micro_lamports(mut self, micro_lamports: u64) -> Self {
        self.priority_fee_micro_lamports = Some(micro_lamports);
        self
    }

    /// Sets the compute unit limit.
    #[must_use]
    pub const fn with_compute_unit_limit(mut self, units: u32) -> Self {
        self.compute_unit_limit = Some(units);
        self
    }

    /// Returns the instruction list in insertion order: the transfer first,
    /// then the fee directives.
    #[must_use]
    pub fn instructions(&self) -> Vec<Instruction> {
        let mut instructions = vec![system_instruction::transfer(
            &self.sender,
            &self.recipient,
            self.lamports,
        )];
        if let Some(micro_lamports) = self.priority_fee_micro_lamports {
            instructions.push(ComputeBudgetInstruction::set_compute_unit_price(
                micro_lamports,
            ));
        }
        if let Some(units) = self.compute_unit_limit {
            instructions.push(ComputeBudgetInstruction::set_compute_unit_limit(units));
        }
        instructions
    }

    /// Compiles the transfer into an unsigned v0 message bound to a recent
    /// blockhash.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] when the instruction set cannot be encoded
    /// into a valid message.
    pub fn compile(self, recent_blockhash: Hash) -> Result<UnsignedTransfer, CompileError> {
        let message =
            v0::Message::try_compile(&self.sender, &self.instructions(), &[], recent_blockhash)?;
        Ok(UnsignedTransfer {
            message: VersionedMessage::V0(message),
        })
    }
}

#[cfg(test)]
mod tests {
    use solana_keypair::Keypair;
    use solana_signer::Signer;

    use super::*;

    #[test]
    fn transfer_instruction_comes_before_fee_directive() {
        let sender = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        let instructions = TransferBuilder::new(sender, recipient, 1_000)
            .with_priority_fee_micro_lamports(100_000)
            .instructions();

        assert_eq!(instructions.len(), 2);
        let first = instructions.first();
        assert!(first.is_some());
        if let Some(first) = first {
            assert_eq!(first.program_id, solana_system_interface::program::ID);
        }
        let second = instructions.get(1);
        assert!(second.is_some());
        if let Some(second) = second {
            assert_eq!(second.data.first().copied(), Some(3_u8));
        }
    }

    #[test]
    fn compute_unit_limit_is_appended_when_configured() {
        let sender = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        let instructions = TransferBuilder::new(sender, recipient, 1_000)
            .with_priority_fee_micro_lamports(100_000)
            .with_compute_unit_limit(200_000)
            .instructions();

        assert_eq!(instructions.len(), 3);
        let third = instructions.get(2);
        assert!(third.is_some());
        if let Some(third) = third {
            assert_eq!(third.data.first().copied(), Some(2_u8));
        }
    }

    #[test]
    fn compile_binds_sender_as_payer() {
        let sender = Keypair::new();
        let recipient = Pubkey::new_unique();
        let unsigned = TransferBuilder::new(sender.pubkey(), recipient, 1_000)
            .with_priority_fee_micro_lamports(100_000)
            .compile(Hash::new_from_array([7_u8; 32]));

        assert!(unsigned.is_ok());
        if let Ok(unsigned) = unsigned {
            let keys = unsigned.message().static_account_keys();
            assert_eq!(keys.first(), Some(&sender.pubkey()));
            assert_eq!(unsigned.message().instructions().len(), 2);
        }
    }

    #[test]
    fn sign_produces_exactly_one_signature() {
        let sender = Keypair::new();
        let recipient = Pubkey::new_unique();
        let unsigned = TransferBuilder::new(sender.pubkey(), recipient, 1_000)
            .compile(Hash::new_from_array([8_u8; 32]));

        assert!(unsigned.is_ok());
        if let Ok(unsigned) = unsigned {
            let tx = unsigned.sign(&[&sender]);
            assert!(tx.is_ok());
            if let Ok(tx) = tx {
                assert_eq!(tx.signatures.len(), 1);
                let first = tx.signatures.first();
                assert!(first.is_some());
                if let Some(first) = first {
                    assert_ne!(*first, solana_signature::Signature::default());
                }
            }
        }
    }
}

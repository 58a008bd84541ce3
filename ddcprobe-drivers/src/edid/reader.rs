//! EDID read and validation
//!
//! One read session is a single random read transaction spanning the base
//! block and every extension block it declares:
//!
//! 1. Address the EEPROM at offset 0 (address nacks are not fatal).
//! 2. Stream the base block, summing its bytes and picking up the
//!    extension count at offset 126.
//! 3. If the base block does not sum to zero, stop. No extension is read.
//! 4. Stream each extension block with a fresh sum; the first failing
//!    block stops the session.
//! 5. Stop after the last byte of the last block.
//!
//! Only the very last byte of the session is nacked. For the base block
//! that decision depends on the extension count read two bytes earlier.

use ddcprobe_core::config::ProbeConfig;
use ddcprobe_core::edid::{
    BlockChecksum, BlockIndex, EdidError, ReadOutcome, CHECKSUM_OFFSET, EDID_BLOCK_SIZE,
    EXTENSION_COUNT_OFFSET,
};
use ddcprobe_core::traits::EdidSink;
use ddcprobe_hal::BusLines;
use embedded_hal::delay::DelayNs;

use crate::i2c::{BitBang, RandomRead};

/// Block being streamed and the state needed to finish it
struct BlockRead {
    index: BlockIndex,
    checksum: BlockChecksum,
    /// Offset after which the checksum is evaluated
    check_at: usize,
    /// This block ends the session
    last_in_session: bool,
}

enum BlockResult {
    Valid,
    Invalid,
}

/// Read, validate and report an EDID session
///
/// Every byte and block verdict goes to `sink` as it happens. The returned
/// outcome summarises the session for programmatic callers.
///
/// # Arguments
/// * `engine` - Initialised engine for the output's bus
/// * `config` - Output configuration (label, verbosity, checksum policy)
/// * `sink` - Receiver of the session's events
pub fn read_edid<B, D, S>(
    engine: &mut BitBang<B, D>,
    config: &ProbeConfig,
    mut sink: S,
) -> ReadOutcome
where
    B: BusLines,
    D: DelayNs,
    S: EdidSink,
{
    let mut session = RandomRead::open_edid(engine);
    let nacks = session.nacks();

    if config.verbose {
        for phase in nacks.iter() {
            sink.address_nack(config.label.as_str(), phase);
        }
    }

    let mut outcome = ReadOutcome {
        extension_count: 0,
        blocks_read: 0,
        bytes_read: 0,
        nacks,
        result: Ok(()),
    };

    // The base block may end the session; that is only known once its
    // extension count has been read.
    let mut base = BlockRead {
        index: BlockIndex::Base,
        checksum: BlockChecksum::new(),
        check_at: CHECKSUM_OFFSET,
        last_in_session: false,
    };
    if let BlockResult::Invalid = stream_block(&mut session, &mut base, &mut outcome, &mut sink)
    {
        return fail(session, base.index, outcome);
    }

    let extensions = outcome.extension_count;
    for e in 0..extensions {
        let mut block = BlockRead {
            index: BlockIndex::Extension(e),
            checksum: BlockChecksum::new(),
            check_at: config.extension_check.offset(),
            last_in_session: e + 1 == extensions,
        };
        if let BlockResult::Invalid =
            stream_block(&mut session, &mut block, &mut outcome, &mut sink)
        {
            return fail(session, block.index, outcome);
        }
    }

    session.close();

    #[cfg(feature = "defmt")]
    defmt::debug!(
        "{=str}: EDID read, {=u8} extension(s), {=usize} bytes",
        config.label.as_str(),
        outcome.extension_count,
        outcome.bytes_read
    );

    outcome
}

fn stream_block<B, D, S>(
    session: &mut RandomRead<'_, B, D>,
    block: &mut BlockRead,
    outcome: &mut ReadOutcome,
    sink: &mut S,
) -> BlockResult
where
    B: BusLines,
    D: DelayNs,
    S: EdidSink,
{
    sink.block_start(block.index);
    outcome.blocks_read += 1;

    for offset in 0..EDID_BLOCK_SIZE {
        let is_base = block.index == BlockIndex::Base;
        let last_byte = offset == CHECKSUM_OFFSET
            && if is_base {
                outcome.extension_count == 0
            } else {
                block.last_in_session
            };

        let byte = session.read(!last_byte);
        block.checksum.add(byte);
        outcome.bytes_read += 1;
        sink.byte(block.index, offset, byte);

        if is_base && offset == EXTENSION_COUNT_OFFSET {
            outcome.extension_count = byte;
        }

        if offset == block.check_at && !block.checksum.is_valid() {
            sink.block_end(block.index, false);
            return BlockResult::Invalid;
        }
    }

    sink.block_end(block.index, true);
    BlockResult::Valid
}

fn fail<B, D>(
    session: RandomRead<'_, B, D>,
    block: BlockIndex,
    mut outcome: ReadOutcome,
) -> ReadOutcome
where
    B: BusLines,
    D: DelayNs,
{
    session.close();

    #[cfg(feature = "defmt")]
    defmt::warn!("EDID checksum mismatch in {}", block);

    outcome.result = Err(EdidError::ChecksumMismatch { block });
    outcome
}

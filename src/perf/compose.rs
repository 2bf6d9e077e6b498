use crate::config::{unsupported, Arch};
use crate::error::{Error, Result};

/// How the PMU codes are packed into `perf_event_attr::config`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Composition {
    /// `config` is the first code.
    Direct,

    /// Intel Nehalem/Westmere `OFFCORE_RESPONSE` events use an extra MSR,
    /// which is encoded in the upper 32 bits of `config`.
    Offcore,

    /// Intel NetBurst: codes are ESCR, CCCR and the perf event code.
    /// The event select of the ESCR is replaced by the perf event code, then
    /// ESCR goes to the upper 32 bits and CCCR to the lower 32 bits.
    Netburst,
}

// ESCR event select, bits 25-30.
const ESCR_EVENT_SELECT: u64 = 0x3f << 25;

impl Composition {
    pub fn select(arch: Arch, offcore: bool) -> Self {
        match (offcore, arch) {
            (true, _) => Self::Offcore,
            (false, Arch::Netburst) => Self::Netburst,
            (false, Arch::Generic) => Self::Direct,
        }
    }

    pub fn config(self, codes: &[u64]) -> Result<u64> {
        match self {
            Self::Offcore => match codes {
                &[cfg, extra] => Ok(cfg | extra << 32),
                _ => {
                    tracing::debug!("perf_encoding: offcore=1 count={}", codes.len());
                    Err(Error::Inval(format!(
                        "offcore encoding needs 2 codes, got {}",
                        codes.len()
                    )))
                }
            },
            Self::Netburst => match codes {
                &[escr, cccr, event] => {
                    let escr = (escr & !ESCR_EVENT_SELECT) | event << 25;
                    Ok(escr << 32 | cccr)
                }
                _ => Err(Error::Inval(format!(
                    "NetBurst encoding needs 3 codes, got {}",
                    codes.len()
                ))),
            },
            Self::Direct => {
                if codes.len() > 2 {
                    tracing::debug!("cannot handle count={} > 2", codes.len());
                    unsupported!("{} codes without a composite encoding", codes.len());
                }
                codes
                    .first()
                    .copied()
                    .ok_or_else(|| Error::Inval("empty encoding".to_string()))
            }
        }
    }
}

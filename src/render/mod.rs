//! Output rendering (context packets, status and drift reports)

pub mod agent;
pub mod packet;
pub mod report;
pub mod text;

pub use agent::{agent_json, agent_markdown, build_agent_packet, AgentPacket};
pub use packet::{assemble_packet, render_raw, Packet};
pub use report::{drift_json, status_json};
pub use text::{content_preview, drift_text, status_text};

use super::{Builtin, BuiltinRegistry};
use crate::io_raw::write_stdout;
use crate::state::ShellState;

pub struct EchoBuiltin;

impl Builtin for EchoBuiltin {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn run(&self, argv: &[Vec<u8>], _state: &mut ShellState, _registry: &BuiltinRegistry) -> i32 {
        let mut out = Vec::new();
        for (i, arg) in argv[1..].iter().enumerate() {
            if i > 0 {
                out.push(b' ');
            }
            out.extend_from_slice(arg);
        }
        out.push(b'\n');
        write_stdout(&out);
        0
    }
}

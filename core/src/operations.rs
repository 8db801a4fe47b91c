use crate::config::Quirks;
use crate::constants::{SPRITE_HEIGHT, SPRITE_SHEET_ADDR};
use crate::error::Result;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::state::State;

/// What an instruction may observe beyond the machine state
#[derive(Copy, Clone, Debug, Default)]
pub struct Env {
    /// Snapshot of the keypad taken before the instruction runs
    pub keypad: Keypad,
    pub quirks: Quirks,
}

/// Every operation receives the state with pc already pointing past the instruction.
pub type Operation = fn(op: &dyn Opcode, state: &State, env: &Env) -> Result<State>;

fn skip_if(state: &State, condition: bool) -> State {
    let pc = if condition {
        state.pc.wrapping_add(0x2)
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// clear
pub fn clr(_op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let mut frame_buffer = state.frame_buffer;
    frame_buffer.clear();
    Ok(State {
        frame_buffer,
        ..*state
    })
}

/// PC = STACK.pop()
pub fn rts(_op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let mut stack = state.stack;
    let pc = stack.pop()?;
    Ok(State { pc, stack, ..*state })
}

/// PC = nnn
pub fn jump(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    Ok(State {
        pc: op.nnn(),
        ..*state
    })
}

/// STACK.push(PC); PC = nnn
pub fn call(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let mut stack = state.stack;
    stack.push(state.pc)?;
    Ok(State {
        pc: op.nnn(),
        stack,
        ..*state
    })
}

/// if Vx == nn then pc += 2
pub fn ske(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    Ok(skip_if(state, state.registers.get(op.x()) == op.nn()))
}

/// if Vx != nn then pc += 2
pub fn skne(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    Ok(skip_if(state, state.registers.get(op.x()) != op.nn()))
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let r = &state.registers;
    Ok(skip_if(state, r.get(op.x()) == r.get(op.y())))
}

/// Vx = nn
pub fn load(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let mut registers = state.registers;
    registers.set(op.x(), op.nn());
    Ok(State {
        registers,
        ..*state
    })
}

/// Vx += nn
/// Allow for overflow but implicitly drop it; VF is untouched
pub fn add(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let mut registers = state.registers;
    registers.set(op.x(), registers.get(op.x()).wrapping_add(op.nn()));
    Ok(State {
        registers,
        ..*state
    })
}

/// Applies a binary operation to Vx and Vy, storing the result in Vx.
/// The operands are read before anything is written, and the flag (if any) is written
/// last so that it wins when x is VF.
fn alu(
    op: &dyn Opcode,
    state: &State,
    f: impl Fn(u8, u8) -> (u8, Option<bool>),
) -> Result<State> {
    let mut registers = state.registers;
    let vx = registers.get(op.x());
    let vy = registers.get(op.y());
    let (res, flag) = f(vx, vy);
    registers.set(op.x(), res);
    if let Some(flag) = flag {
        registers.set_flag(flag);
    }
    Ok(State {
        registers,
        ..*state
    })
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    alu(op, state, |_, vy| (vy, None))
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    alu(op, state, |vx, vy| (vx | vy, None))
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    alu(op, state, |vx, vy| (vx & vy, None))
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    alu(op, state, |vx, vy| (vx ^ vy, None))
}

/// Vx += Vy; VF = carry
pub fn addr(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    alu(op, state, |vx, vy| {
        let (res, carry) = vx.overflowing_add(vy);
        (res, Some(carry))
    })
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    alu(op, state, |vx, vy| (vx.wrapping_sub(vy), Some(vx > vy)))
}

/// Vx >>= 1; VF = lsb
/// With the legacy shift quirk Vy is shifted into Vx instead
pub fn shr(op: &dyn Opcode, state: &State, env: &Env) -> Result<State> {
    let legacy = env.quirks.legacy_shift;
    alu(op, state, |vx, vy| {
        let src = if legacy { vy } else { vx };
        (src >> 1, Some(src & 0x1 == 0x1))
    })
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    alu(op, state, |vx, vy| (vy.wrapping_sub(vx), Some(vy > vx)))
}

/// Vx <<= 1; VF = msb
/// With the legacy shift quirk Vy is shifted into Vx instead
pub fn shl(op: &dyn Opcode, state: &State, env: &Env) -> Result<State> {
    let legacy = env.quirks.legacy_shift;
    alu(op, state, |vx, vy| {
        let src = if legacy { vy } else { vx };
        (src << 1, Some(src & 0x80 == 0x80))
    })
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let r = &state.registers;
    Ok(skip_if(state, r.get(op.x()) != r.get(op.y())))
}

/// I = nnn
pub fn loadi(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let mut registers = state.registers;
    registers.i = op.nnn();
    Ok(State {
        registers,
        ..*state
    })
}

/// PC = V0 + nnn
pub fn jumpi(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    Ok(State {
        pc: u16::from(state.registers.get(0x0)) + op.nnn(),
        ..*state
    })
}

/// Vx = rand_byte & nn
pub fn rand(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let rand_byte: u8 = rand::random();
    let mut registers = state.registers;
    registers.set(op.x(), rand_byte & op.nn());
    Ok(State {
        registers,
        ..*state
    })
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let mut registers = state.registers;
    let mut frame_buffer = state.frame_buffer;

    let x = registers.get(op.x());
    let y = registers.get(op.y());
    let sprite = state
        .memory
        .slice(registers.i as usize, op.n() as usize)?;

    let collision = frame_buffer.draw_sprite(x, y, sprite);
    registers.set_flag(collision);

    Ok(State {
        registers,
        frame_buffer,
        ..*state
    })
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &dyn Opcode, state: &State, env: &Env) -> Result<State> {
    let key = state.registers.get(op.x());
    Ok(skip_if(state, env.keypad.is_pressed(key)))
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &dyn Opcode, state: &State, env: &Env) -> Result<State> {
    let key = state.registers.get(op.x());
    Ok(skip_if(state, !env.keypad.is_pressed(key)))
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let mut registers = state.registers;
    registers.set(op.x(), state.timers.delay.get());
    Ok(State {
        registers,
        ..*state
    })
}

/// await keypress for Vx
/// Without a pressed key the pc is rewound so this instruction runs again next cycle,
/// leaving the scheduler free to keep ticking timers and frames in the meantime.
pub fn keyd(op: &dyn Opcode, state: &State, env: &Env) -> Result<State> {
    match env.keypad.first_pressed() {
        Some(key) => {
            let mut registers = state.registers;
            registers.set(op.x(), key);
            Ok(State {
                registers,
                ..*state
            })
        }
        None => Ok(State {
            pc: state.pc.wrapping_sub(0x2),
            ..*state
        }),
    }
}

/// DT = Vx
pub fn loaddt(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let mut timers = state.timers;
    timers.delay.set(state.registers.get(op.x()));
    Ok(State { timers, ..*state })
}

/// ST = Vx
pub fn loadst(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let mut timers = state.timers;
    timers.sound.set(state.registers.get(op.x()));
    Ok(State { timers, ..*state })
}

/// I += Vx
/// VF is left alone
pub fn addi(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let mut registers = state.registers;
    registers.i = registers.i.wrapping_add(u16::from(registers.get(op.x())));
    Ok(State {
        registers,
        ..*state
    })
}

/// I = &SPRITE_SHEET[Vx]
/// Set I to the memory address of the sprite for the low nibble of Vx
pub fn ldspr(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let mut registers = state.registers;
    let digit = u16::from(registers.get(op.x()) & 0xF);
    registers.i = SPRITE_SHEET_ADDR + digit * SPRITE_HEIGHT;
    Ok(State {
        registers,
        ..*state
    })
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let vx = state.registers.get(op.x());
    let bcd = [vx / 100, vx / 10 % 10, vx % 10];
    let mut memory = state.memory;
    memory
        .slice_mut(state.registers.i as usize, bcd.len())?
        .copy_from_slice(&bcd);
    Ok(State { memory, ..*state })
}

/// mem[I..=I+x] = V0..=Vx
/// I itself is not advanced
pub fn stor(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let count = op.x() as usize + 1;
    let mut memory = state.memory;
    memory
        .slice_mut(state.registers.i as usize, count)?
        .copy_from_slice(&state.registers.v[..count]);
    Ok(State { memory, ..*state })
}

/// V0..=Vx = mem[I..=I+x]
/// I itself is not advanced
pub fn read(op: &dyn Opcode, state: &State, _env: &Env) -> Result<State> {
    let count = op.x() as usize + 1;
    let bytes = state.memory.slice(state.registers.i as usize, count)?;
    let mut registers = state.registers;
    registers.v[..count].copy_from_slice(bytes);
    Ok(State {
        registers,
        ..*state
    })
}

use shakmaty::{Board, ByRole, Role};

/// Material signature such as `KQvKR`: white pieces, `v`, black pieces.
pub fn material_signature(board: &Board) -> String {
    let material = board.material();

    let mut name = side_signature(&material.white);
    name.push('v');
    name.push_str(&side_signature(&material.black));
    name
}

/// Pieces of one side, strongest first.
fn side_signature(counts: &ByRole<u8>) -> String {
    [
        (Role::King, counts.king),
        (Role::Queen, counts.queen),
        (Role::Rook, counts.rook),
        (Role::Bishop, counts.bishop),
        (Role::Knight, counts.knight),
        (Role::Pawn, counts.pawn),
    ]
    .into_iter()
    .flat_map(|(role, count)| std::iter::repeat_n(role.upper_char(), usize::from(count)))
    .collect()
}

use crate::search::Direction;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Compose,
    Search(Direction),
}

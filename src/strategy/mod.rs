mod core;


pub use self::core::{
    Strategy, count_bits_bit_loop, count_bits_hardware, count_bits_kernighan,
    count_bits_partitioned, count_bits_table,
};

use cbuf::RingBuffer;

fn main() {
    let mut rb = RingBuffer::<i32, 5>::new();

    rb.push(1);
    rb.push(2);
    rb.push(3);

    println!("len: {}, full: {}", rb.len(), rb.is_full());

    rb.push(4);
    rb.push(5);
    rb.push(6); // overwrites 1

    println!("len: {}, full: {}", rb.len(), rb.is_full());
    println!("{rb:?}");

    if let Some(value) = rb.pop() {
        println!("popped: {value}, len: {}", rb.len());
    }
}
